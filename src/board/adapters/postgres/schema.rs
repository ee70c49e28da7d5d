//! Diesel schema for board persistence.

diesel::table! {
    /// One stored board per account.
    boards (account_key) {
        /// Normalised account key, at most `AccountKey::MAX_LENGTH` characters.
        #[max_length = 320]
        account_key -> Varchar,
        /// Columns and tasks as JSONB.
        document -> Jsonb,
        /// Last save timestamp.
        updated_at -> Timestamptz,
    }
}
