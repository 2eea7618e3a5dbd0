//! Command-line front end for the dashboard access layer.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::{Parser, Subcommand};
use dashboard_client::config::ClientSettings;
use dashboard_client::domain::ports::SubmissionFile;
use dashboard_client::domain::{
    ApiClient, AssignmentService, ClientError, GradeSummary, GradesService, HttpMethod,
    PlannerOutcome, PlannerService, RequestOptions, SessionContext, SubmissionDraft,
};
use dashboard_client::outbound::http::ReqwestTransport;
use dashboard_client::outbound::recommendations::ApiRecommendationSource;
use dashboard_client::outbound::session::SettingsSessionProvider;
use dashboard_client::outbound::uploads::PlaceholderSubmissionUploader;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// `dashboard-cli` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard-cli",
    about = "Query the student dashboard backend with the configured session",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Issue one authenticated call and print the JSON response.
    Call {
        /// Backend path, for example `/api/modules/m1`.
        path: String,
        /// HTTP verb.
        #[arg(long, value_parser = parse_method, default_value = "GET")]
        method: HttpMethod,
        /// JSON request body.
        #[arg(long, value_parser = parse_json)]
        body: Option<Value>,
        /// Extra header as `Name: value`; repeatable.
        #[arg(long = "header", value_name = "name: value", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        /// Full options object as JSON; unknown keys are rejected.
        #[arg(long, value_parser = parse_json, conflicts_with_all = ["body", "headers"])]
        options: Option<Value>,
    },
    /// Print per-module grades for the session student.
    Grades {
        /// Include the pass count and average.
        #[arg(long)]
        summary: bool,
    },
    /// Print the study planner for the session student.
    Planner,
    /// Print an assignment with its module and the student's progress.
    Assignment {
        /// Module id.
        module_id: String,
        /// Assignment template id.
        assignment_id: String,
    },
    /// Submit an assignment answer.
    Submit {
        /// Module id.
        module_id: String,
        /// Assignment template id.
        assignment_id: String,
        /// Free-text answer.
        #[arg(long, default_value = "")]
        text: String,
        /// File to attach.
        #[arg(long, value_name = "path")]
        file: Option<PathBuf>,
    },
}

fn main() -> io::Result<()> {
    if let Err(error) = json_subscriber(io::stderr).try_init() {
        warn!(error = %error, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

/// JSON log subscriber writing to `writer`; stdout stays reserved for output.
fn json_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(writer)
        .finish()
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ClientSettings::load_from_iter([OsString::from("dashboard-cli")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    let base_url = settings.base_url().map_err(io::Error::other)?;
    let client = build_client(base_url, &settings, clock.clone())?;
    let ctx = SessionContext::resolve(&SettingsSessionProvider::new(settings.clone()))
        .await
        .map_err(|error| io::Error::other(format!("resolve session: {error}")))?;

    let output = match args.command {
        Command::Call {
            path,
            method,
            body,
            headers,
            options,
        } => {
            let options = match options {
                Some(raw) => RequestOptions::from_value(raw),
                None => Ok(call_options(method, body, headers)),
            }
            .map_err(command_error)?;
            client
                .call(&ctx, &path, options)
                .await
                .map_err(command_error)?
        }
        Command::Grades { summary } => {
            let grades = GradesService::new(client)
                .fetch(&ctx)
                .await
                .map_err(command_error)?;
            let rows: Vec<Value> = grades
                .iter()
                .map(|grade| {
                    json!({
                        "moduleName": grade.module_name,
                        "grade": grade.grade,
                        "band": grade.band().label(),
                    })
                })
                .collect();
            if summary {
                json!({ "grades": rows, "summary": GradeSummary::from_grades(&grades) })
            } else {
                json!({ "grades": rows })
            }
        }
        Command::Planner => {
            let ml_base_url = settings.ml_base_url().map_err(io::Error::other)?;
            let ml_client = build_client(ml_base_url, &settings, clock)?;
            let source = Arc::new(ApiRecommendationSource::new(ml_client));
            let outcome = PlannerService::new(source)
                .fetch(&ctx)
                .await
                .map_err(command_error)?;
            planner_output(&outcome)
        }
        Command::Assignment {
            module_id,
            assignment_id,
        } => {
            let service = assignment_service(client, clock);
            let detail = service
                .load(&ctx, &module_id, &assignment_id)
                .await
                .map_err(command_error)?;
            json!({
                "assignment": detail.assignment,
                "module": detail.module,
                "progress": detail.progress,
            })
        }
        Command::Submit {
            module_id,
            assignment_id,
            text,
            file,
        } => {
            let file = file.as_deref().map(read_submission_file).transpose()?;
            let draft = SubmissionDraft {
                module_id,
                assignment_id,
                text,
                file,
            };
            assignment_service(client, clock)
                .submit(&ctx, &draft)
                .await
                .map_err(command_error)?
        }
    };

    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|error| io::Error::other(format!("render output: {error}")))?;
    println!("{rendered}");
    Ok(())
}

fn build_client(
    base_url: Url,
    settings: &ClientSettings,
    clock: Arc<dyn Clock + Send + Sync>,
) -> io::Result<ApiClient> {
    let transport = ReqwestTransport::new(base_url, settings.timeout())
        .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
    Ok(ApiClient::new(Arc::new(transport)).with_clock(clock))
}

fn assignment_service(client: ApiClient, clock: Arc<dyn Clock + Send + Sync>) -> AssignmentService {
    let uploader = Arc::new(PlaceholderSubmissionUploader::new(clock.clone()));
    AssignmentService::new(client, uploader, clock)
}

fn call_options(
    method: HttpMethod,
    body: Option<Value>,
    headers: Vec<(String, String)>,
) -> RequestOptions {
    let options = RequestOptions::new().with_method(method);
    let options = match body {
        Some(value) => options.with_body(value),
        None => options,
    };
    headers
        .into_iter()
        .fold(options, |acc, (name, value)| acc.with_header(name, value))
}

fn planner_output(outcome: &PlannerOutcome) -> Value {
    match outcome {
        PlannerOutcome::Personalised(plan) => json!({ "source": "personalised", "plan": plan }),
        PlannerOutcome::Fallback { plan, error } => json!({
            "source": "fallback",
            "plan": plan,
            "error": error.to_string(),
        }),
    }
}

fn command_error(error: ClientError) -> io::Error {
    match error {
        ClientError::Unauthenticated => io::Error::new(
            io::ErrorKind::PermissionDenied,
            "not logged in: set DASHBOARD_SESSION_TOKEN and DASHBOARD_USER_ID",
        ),
        other => io::Error::other(other.to_string()),
    }
}

fn parse_method(raw: &str) -> Result<HttpMethod, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "GET" => Ok(HttpMethod::Get),
        "POST" => Ok(HttpMethod::Post),
        "PUT" => Ok(HttpMethod::Put),
        "PATCH" => Ok(HttpMethod::Patch),
        "DELETE" => Ok(HttpMethod::Delete),
        other => Err(format!("unsupported HTTP method {other}")),
    }
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|error| format!("invalid JSON: {error}"))
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| "headers must look like `Name: value`".to_owned())?;
    let name = name.trim();
    if name.is_empty() {
        return Err("header name must not be empty".to_owned());
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}

fn read_submission_file(path: &Path) -> io::Result<SubmissionFile> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "--file must name a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open submission directory '{}': {error}",
            parent.display()
        ))
    })?;
    let bytes = directory.read(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("read submission file '{}': {error}", path.display()))
    })?;
    Ok(SubmissionFile {
        file_name: file_name.to_string_lossy().into_owned(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use std::io::Write;
    use std::sync::Mutex;

    use clap::Parser;
    use env_lock::lock_env;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    #[rstest]
    #[case("get", HttpMethod::Get)]
    #[case("Post", HttpMethod::Post)]
    #[case(" DELETE ", HttpMethod::Delete)]
    fn method_parser_is_case_insensitive(#[case] raw: &str, #[case] expected: HttpMethod) {
        assert_eq!(parse_method(raw), Ok(expected));
    }

    #[rstest]
    fn method_parser_rejects_unknown_verbs() {
        let error = parse_method("TRACE").expect_err("must reject");
        assert!(error.contains("TRACE"));
    }

    #[rstest]
    #[case("X-Trace: abc", ("X-Trace", "abc"))]
    #[case("Accept:application/json", ("Accept", "application/json"))]
    #[case("X-Empty:", ("X-Empty", ""))]
    fn header_parser_splits_on_first_colon(#[case] raw: &str, #[case] expected: (&str, &str)) {
        let (name, value) = parse_header(raw).expect("parses");
        assert_eq!((name.as_str(), value.as_str()), expected);
    }

    #[rstest]
    #[case("no-colon")]
    #[case(": value")]
    fn header_parser_rejects_malformed_input(#[case] raw: &str) {
        assert!(parse_header(raw).is_err());
    }

    #[rstest]
    fn call_options_fold_flags_in_order() {
        let options = call_options(
            HttpMethod::Post,
            Some(json!({ "title": "Databases" })),
            vec![
                ("X-Trace".to_owned(), "1".to_owned()),
                ("X-Trace".to_owned(), "2".to_owned()),
            ],
        );
        assert_eq!(options.method(), HttpMethod::Post);
        assert_eq!(options.body(), Some(&json!({ "title": "Databases" })));
        assert_eq!(options.headers().get("X-Trace").map(String::as_str), Some("2"));
    }

    #[rstest]
    fn options_flag_conflicts_with_body() {
        let parsed = CliArgs::try_parse_from([
            "dashboard-cli",
            "call",
            "/api/modules",
            "--body",
            "{}",
            "--options",
            "{}",
        ]);
        assert!(parsed.is_err());
    }

    #[rstest]
    fn planner_output_names_fallback_reason() {
        let outcome = PlannerOutcome::Fallback {
            plan: dashboard_client::domain::StudyPlan::fallback(),
            error: ClientError::Unauthenticated,
        };
        let output = planner_output(&outcome);
        assert_eq!(output["source"], "fallback");
        assert_eq!(output["error"], "User not authenticated");
        assert_eq!(output["plan"]["studyHoursPerWeek"], 20.0);
    }

    #[rstest]
    fn submission_file_is_read_with_its_name() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"essay body").expect("write temp file");

        let submission = read_submission_file(file.path()).expect("file should read");
        assert_eq!(submission.bytes, b"essay body".to_vec());
        assert_eq!(
            Some(submission.file_name.as_str()),
            file.path().file_name().and_then(|name| name.to_str())
        );
    }

    #[rstest]
    fn missing_submission_file_is_an_error() {
        let error = read_submission_file(Path::new("/nonexistent/dir/essay.pdf"))
            .expect_err("must fail");
        assert!(error.to_string().contains("essay.pdf") || error.to_string().contains("nonexistent"));
    }

    #[rstest]
    fn bare_file_names_resolve_against_the_working_directory() {
        let mut file = tempfile::Builder::new()
            .prefix("submission")
            .suffix(".txt")
            .tempfile_in(".")
            .expect("temp file in working directory");
        file.write_all(b"draft").expect("write temp file");
        let bare = Path::new(file.path().file_name().expect("file name"));

        let submission = read_submission_file(bare).expect("bare name should read");
        assert_eq!(submission.bytes, b"draft".to_vec());
        assert_eq!(Some(submission.file_name.as_str()), bare.to_str());
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("buffer lock").clone();
            String::from_utf8(bytes).expect("utf-8 logs")
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    fn log_events_go_to_the_given_writer_as_json() {
        let _guard = lock_env([("RUST_LOG", None::<String>)]);
        let buffer = SharedBuffer::default();
        let sink = buffer.clone();
        let subscriber = json_subscriber(move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(path = "/api/modules", "request failed");
        });

        let logged = buffer.contents();
        let line = logged.lines().next().expect("one log line");
        let event: Value = serde_json::from_str(line).expect("json log line");
        assert_eq!(event["level"], "ERROR");
        assert_eq!(event["fields"]["message"], "request failed");
        assert_eq!(event["fields"]["path"], "/api/modules");
    }
}
