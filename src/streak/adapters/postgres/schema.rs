//! Diesel schema for weekly streaks.

diesel::table! {
    /// One streak record per user.
    weekly_streaks (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning user; unique.
        user_id -> Uuid,
        /// Monday flag.
        mon -> Bool,
        /// Tuesday flag.
        tue -> Bool,
        /// Wednesday flag.
        wed -> Bool,
        /// Thursday flag.
        thu -> Bool,
        /// Friday flag.
        fri -> Bool,
        /// Saturday flag.
        sat -> Bool,
        /// Sunday flag.
        sun -> Bool,
        /// Latest check-in.
        last_check_in -> Nullable<Timestamptz>,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
