//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, update the matching block here (or regenerate
//! with `diesel print-schema`).

diesel::table! {
    /// Registered accounts keyed by username.
    users (username) {
        username -> Varchar,
        /// Argon2id hash in PHC string format.
        password_hash -> Text,
        gender -> Text,
        age -> Text,
        ethnicity -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only survey responses.
    surveys (survey_id) {
        survey_id -> Uuid,
        username -> Varchar,
        gender -> Nullable<Text>,
        age -> Nullable<Text>,
        ethnicity -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Trips and their fixed parameters.
    trips (trip_id) {
        trip_id -> Uuid,
        username -> Varchar,
        budget -> Text,
        group_type -> Text,
        group_size -> Text,
        duration_days -> Int4,
        trip_location -> Text,
        current_location -> Text,
        child_friendly -> Bool,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recommended events; `(trip_id, sequence)` is unique.
    events (event_id) {
        event_id -> Uuid,
        trip_id -> Uuid,
        sequence -> Int4,
        name -> Text,
        description -> Text,
        location -> Text,
        duration -> Text,
        cost -> Text,
        /// `model` or `fallback`.
        source -> Text,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mood and rating feedback; `trip_id` is null for free-standing records.
    feedback (feedback_id) {
        feedback_id -> Uuid,
        trip_id -> Nullable<Uuid>,
        username -> Varchar,
        mood -> Text,
        prev_event_rating -> Nullable<Text>,
        current_location -> Text,
        prev_state -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(trips -> users (username));
diesel::joinable!(events -> trips (trip_id));

diesel::allow_tables_to_appear_in_same_query!(users, surveys, trips, events, feedback);
