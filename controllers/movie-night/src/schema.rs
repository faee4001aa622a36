table! {
    categories (id) {
        id -> Int4,
        name -> Varchar,
        slug -> Varchar,
        description -> Text,
    }
}

table! {
    items (id) {
        id -> Int4,
        category_id -> Int4,
        title -> Varchar,
        year -> Nullable<Int4>,
        director -> Nullable<Varchar>,
        genre -> Nullable<Varchar>,
        imdb_id -> Nullable<Varchar>,
    }
}

table! {
    ratings (id) {
        id -> Int4,
        user_id -> Int4,
        item_id -> Int4,
        level -> Varchar,
        updated_at -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
    }
}

joinable!(items -> categories (category_id));
joinable!(ratings -> items (item_id));
joinable!(ratings -> users (user_id));

allow_tables_to_appear_in_same_query!(
    categories,
    items,
    ratings,
    users,
);
