//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate them
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Jobs published by employers.
    ///
    /// Owned by the job catalogue; this service reads the owner and writes
    /// `status` when completion closes the job.
    jobs (id) {
        /// Primary key.
        id -> Int8,
        /// Employer that published the job.
        employer_id -> Int8,
        /// `open` or `completed`; legacy rows may hold `abierto`/`completado`.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// A student's like or dislike of a job, one row per pair.
    student_interests (student_id, job_id) {
        /// Student expressing interest.
        student_id -> Int8,
        /// Job the interest refers to.
        job_id -> Int8,
        /// `true` for a like, `false` for a dislike.
        interested -> Bool,
        /// Time of the latest submission.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// An employer's like or dislike of a student for a job.
    employer_interests (employer_id, student_id, job_id) {
        /// Employer expressing interest.
        employer_id -> Int8,
        /// Student the interest refers to.
        student_id -> Int8,
        /// Job the interest refers to.
        job_id -> Int8,
        /// `true` for a like, `false` for a dislike.
        interested -> Bool,
        /// Time of the latest submission.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mutual matches and their completion state.
    ///
    /// `(student_id, employer_id, job_id)` is unique; derivation relies on
    /// that constraint for `INSERT ... ON CONFLICT`.
    matches (id) {
        /// Primary key.
        id -> Int8,
        /// Student side.
        student_id -> Int8,
        /// Employer side.
        employer_id -> Int8,
        /// Job matched on.
        job_id -> Int8,
        /// Mutual interest established; never reset.
        is_match -> Bool,
        /// Student confirmed completion.
        student_completed -> Bool,
        /// Employer confirmed completion.
        employer_completed -> Bool,
        /// Stored status literal; recomputed from the flags on read.
        status -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(student_interests -> jobs (job_id));
diesel::joinable!(employer_interests -> jobs (job_id));
diesel::joinable!(matches -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(jobs, student_interests, employer_interests, matches);
