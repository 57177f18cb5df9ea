//! Boundary logging macros.
//!
//! Engine commands bracket every operation with one start event and exactly
//! one terminal event (`end` or `end_error`). The core never calls these; it
//! only emits `debug`/`warn` detail events.

/// Log the start of an operation, with optional extra fields
///
/// # Example
///
/// ```
/// # use docvers_core::log_op_start;
/// log_op_start!("expand_document", destination = "docs/api.html");
/// log_op_start!("build_changelog");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation; `duration_ms` is required
///
/// # Example
///
/// ```
/// # use docvers_core::log_op_end;
/// # use docvers_core::{expand, Document, VersionContext, VersionDirectory, VersionOptions};
/// let start = std::time::Instant::now();
/// let options = VersionOptions::default().with_versions(["1.0.0"]);
/// let outputs = expand(
///     &Document::new("docs/api.html", Vec::new()),
///     &VersionContext::new(&options),
///     &VersionDirectory,
/// );
/// log_op_end!(
///     "expand_document",
///     duration_ms = start.elapsed().as_millis() as u64,
///     output_count = outputs.len()
/// );
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log a failed operation
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// the event carries its kind, its stable code and its rendered form, which
/// includes the op, version and path context.
///
/// # Example
///
/// ```
/// # use docvers_core::log_op_error;
/// # use docvers_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::InvalidDocument)
///     .with_version("1.1.0")
///     .with_path("versions.json[1]");
/// log_op_error!("build_changelog", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_detail = %ex_err,
            $($($field)+)?
        );
    }};
}
