diesel::table! {
    client_status (code) {
        code -> Text,
        name -> Text,
        description -> Nullable<Text>,
        is_active -> Bool,
        display_order -> Nullable<Int4>,
        color_hex -> Nullable<Text>,
    }
}

diesel::table! {
    language (code) {
        code -> Text,
        name -> Text,
        native_name -> Nullable<Text>,
        is_active -> Bool,
        display_order -> Nullable<Int4>,
    }
}

diesel::table! {
    pronoun (code) {
        code -> Text,
        display_text -> Text,
        is_active -> Bool,
        display_order -> Nullable<Int4>,
    }
}

diesel::table! {
    sex_value (code) {
        code -> Text,
        name -> Text,
        is_active -> Bool,
        display_order -> Nullable<Int4>,
    }
}

diesel::table! {
    client (id) {
        id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        date_of_birth -> Date,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
        status_code -> Text,
        primary_language_code -> Nullable<Text>,
        pronoun_code -> Nullable<Text>,
        sex_code -> Nullable<Text>,
        interpreter_needed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Uuid,
        updated_by -> Uuid,
        deleted_at -> Nullable<Timestamptz>,
    }
}
