//! Diesel schema for the account columns this context touches.

diesel::table! {
    /// User accounts owned by the identity subsystem.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        username -> Varchar,
        /// Contact address; unique.
        #[max_length = 255]
        email -> Varchar,
        /// Leaderboard balance.
        points -> Int8,
    }
}
