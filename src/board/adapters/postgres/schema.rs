//! Diesel schema for remote board documents.

diesel::table! {
    /// Column layout documents, one per owner.
    board_topologies (owner_id) {
        /// Owning identity.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Layout payload (`columns`, `columnOrder`).
        document -> Jsonb,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task documents partitioned by owner.
    task_documents (id) {
        /// Task identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Owning identity.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Task payload (`id`, `title`, `description`, `ownerId`).
        document -> Jsonb,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}
