use color_eyre::Result;
use colored::*;
use std::future::Future;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! run_test {
    ($call:expr) => {
        $crate::runner::orchestration_utils::run_test_impl(stringify!($call), $call)
    };
}

/// Runs every listed test against the context, in order, then prints a summary.
///
/// Later tests build on the users and events earlier ones created, so the
/// suite stops at the first failure.
#[macro_export]
macro_rules! execute_suite {
    ($context:expr, [ $($test_fn:ident),* $(,)? ]) => {{
        let total_tests = 0 $( + { let _ = stringify!($test_fn); 1 } )*;
        let mut passed_tests = 0;
        let suite_start = Instant::now();
        println!();

        $(
            run_test!($test_fn($context)).await?;
            passed_tests += 1;
        )*

        $crate::runner::orchestration_utils::print_summary(
            passed_tests,
            total_tests,
            suite_start.elapsed(),
        );
    }};
}

fn divider() -> ColoredString {
    "─".repeat(60).truecolor(80, 80, 80)
}

fn pretty_test_name(raw_name: &str) -> &str {
    let name_no_args = raw_name.split('(').next().unwrap_or(raw_name);
    name_no_args
        .split("::")
        .last()
        .unwrap_or(name_no_args)
        .trim()
}

/// Runs one test future with a banner before and a verdict after.
pub async fn run_test_impl<Fut>(raw_name: &str, test: Fut) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    let pretty_name = pretty_test_name(raw_name);

    println!("{}", divider());
    println!(
        "{} {}",
        " RUNNING ".on_cyan().black().bold(),
        pretty_name.cyan().bold()
    );

    let start_time = Instant::now();
    let result = test.await;
    let elapsed = start_time.elapsed();

    match &result {
        Ok(()) => println!(
            "{} {} ({:.2?})",
            " PASSED ".on_green().black().bold(),
            pretty_name.green(),
            elapsed
        ),
        Err(e) => {
            println!(
                "{} {} ({:.2?})",
                " FAILED ".on_red().black().bold(),
                pretty_name.red(),
                elapsed
            );
            println!("\n{e:?}");
        }
    }

    result.map_err(|e| e.wrap_err(format!("{pretty_name} failed")))
}

pub fn print_summary(passed: usize, total: usize, elapsed: std::time::Duration) {
    println!("{}", divider());
    println!(
        "{} {}/{} tests passed in {:.2?}.",
        " SUMMARY ".on_purple().black().bold(),
        passed,
        total,
        elapsed
    );
    println!("{}", divider());
    println!();
}

pub fn setup_tracing_and_panic_handling() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,sqlx=warn,api=debug,common_services=debug,tower_http=info,hyper=error,reqwest=error"
            .into()
    });

    // Either may already be installed when several test binaries share a process.
    let _ = fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
    let _ = color_eyre::install();
}

#[cfg(test)]
mod tests {
    use super::pretty_test_name;

    #[test]
    fn strips_arguments_and_module_path() {
        assert_eq!(pretty_test_name("test_login(&context)"), "test_login");
        assert_eq!(
            pretty_test_name("tests::test_auth::test_refresh(ctx)"),
            "test_refresh"
        );
    }
}
