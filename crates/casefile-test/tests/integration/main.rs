mod helpers;

mod client_lifecycle;
mod list_search;
mod reference_data;
