//! Diesel schema for daily task persistence.

diesel::table! {
    /// Daily task slots, five per user and day.
    daily_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Position within the set, 1 to 5.
        task_number -> SmallInt,
        /// Completion flag.
        completed -> Bool,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Midnight that ends the day the set belongs to.
        reset_at -> Timestamptz,
    }
}

diesel::table! {
    /// One progress record per user.
    daily_task_progress (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning user; unique.
        user_id -> Uuid,
        /// Completions recorded for the current day.
        completed_count -> SmallInt,
        /// Latest completion timestamp.
        last_completed_at -> Nullable<Timestamptz>,
        /// End of the cooldown started by the latest completion.
        cooldown_end -> Nullable<Timestamptz>,
        /// Midnight that ends the current day.
        next_reset_at -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
