table! {
    clients (client_id) {
        client_id -> Text,
        name -> Text,
        secret -> Text,
        redirect_uri -> Text,
        website -> Text,
        logo -> Text,
        code -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
