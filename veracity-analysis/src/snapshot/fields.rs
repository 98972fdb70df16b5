//! Canonical field names shared by collectors, rules, and team baselines.

/// Issue-tracker (Jira) daily fields.
pub mod jira {
    pub const ISSUES_COMPLETED: &str = "issues_completed";
    pub const ON_TIME_COUNT: &str = "on_time_count";
    pub const STATUS_UPDATES: &str = "status_updates";
    pub const WORKLOG_MINUTES: &str = "worklog_minutes";
    pub const ATTACHMENTS: &str = "attachments";

    /// Fields checked by the numeric-validity rules.
    pub const REQUIRED: &[&str] = &[
        ISSUES_COMPLETED,
        ON_TIME_COUNT,
        STATUS_UPDATES,
        WORKLOG_MINUTES,
        ATTACHMENTS,
    ];
}

/// Source-control (GitHub) daily fields.
pub mod github {
    pub const COMMITS: &str = "commits";
    pub const PRS_OPENED: &str = "prs_opened";
    pub const REVIEWS: &str = "reviews";
    pub const ADDED_LINES: &str = "added_lines";
    pub const DELETED_LINES: &str = "deleted_lines";
    pub const FILES_CHANGED: &str = "files_changed";

    /// Fields checked by the numeric-validity rules.
    pub const REQUIRED: &[&str] = &[
        COMMITS,
        PRS_OPENED,
        REVIEWS,
        ADDED_LINES,
        DELETED_LINES,
        FILES_CHANGED,
    ];
}

/// Design-tool (Figma) daily fields.
pub mod figma {
    pub const FILES_UPDATED: &str = "files_updated";
    pub const NODES_CHANGED: &str = "nodes_changed";
    pub const COMMENTS_ADDED: &str = "comments_added";
    pub const COMMENTS_RESOLVED: &str = "comments_resolved";
    pub const MENTIONS: &str = "mentions";
    pub const COMPONENTS_PUBLISHED: &str = "components_published";
    pub const SHARED_LINKS: &str = "shared_links";

    /// Fields checked by the numeric-validity rules.
    pub const REQUIRED: &[&str] = &[
        FILES_UPDATED,
        NODES_CHANGED,
        COMMENTS_ADDED,
        COMMENTS_RESOLVED,
        MENTIONS,
        COMPONENTS_PUBLISHED,
        SHARED_LINKS,
    ];
}

/// Team-baseline keys for derived fields that span raw columns. Plain
/// fields use their raw names (`nodes_changed`, `files_updated`, ...).
pub mod baseline {
    pub const WORKLOG_MINUTES: &str = "worklog_minutes";
    pub const GITHUB_DIFF_LINES: &str = "github_diff_lines";
    pub const FIGMA_COMMENTS: &str = "comments";
}
