//! Diesel schema for list and task persistence.
//!
//! `tasks.list_id` references `lists.id` with `ON DELETE CASCADE`, so
//! deleting a list removes its tasks at the store level.

diesel::table! {
    /// User-owned task lists.
    lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List title.
        #[max_length = 255]
        title -> Varchar,
        /// Owning user identifier.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks belonging to exactly one list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Parent list identifier.
        list_id -> Uuid,
        /// Completion flag.
        is_completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(lists, tasks);
