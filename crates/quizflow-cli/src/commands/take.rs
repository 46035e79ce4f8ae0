//! The `quizflow take` command.

use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use quizflow_core::attempt::{Completion, ExamEvent, Phase};
use quizflow_core::model::format_clock;
use quizflow_core::report::AttemptReport;
use quizflow_report::{render_result, render_review, write_html_report};
use quizflow_session::{ExamSession, ExamView, SessionConfig, SessionHandle};

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    course: String,
    module: String,
    catalog: Option<PathBuf>,
    answers: Option<String>,
    yes: bool,
    output: Option<PathBuf>,
    time_limit: Option<u64>,
    html: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::config_for(config_path.as_ref())?;
    let resolver = super::resolver_for(catalog.as_ref(), &config)?;

    let resolved = match resolver.resolve(&course, &module).await {
        Ok(resolved) => resolved,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("quiz unavailable: {e}. Run `quizflow list` to see what exists.")
        }
        Err(e) => return Err(e).context("failed to resolve quiz"),
    };

    let scripted = answers.as_deref().map(parse_answers).transpose()?;

    // Intro
    let intro = resolved.intro();
    println!("{}", intro.module_title);
    println!("Get ready for your quiz!");
    println!("  Questions:    {}", intro.question_count);
    println!("  Time:         {}", intro.clock());
    println!("  Total points: {}", intro.total_points);

    if let Some(indices) = &scripted {
        anyhow::ensure!(
            indices.len() <= intro.question_count,
            "{} answers scripted but the quiz has only {} questions",
            indices.len(),
            intro.question_count
        );
    } else if !yes {
        print!("Start exam? [y/N] ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if !matches!(line.trim(), "y" | "Y" | "yes") {
            println!("Exam not started.");
            return Ok(());
        }
    }

    let session_config = SessionConfig {
        time_limit_secs: time_limit.or(config.time_limit_secs),
        ..Default::default()
    };
    let (handle, run) = ExamSession::start(&resolved, session_config)?;

    let completion = match &scripted {
        Some(indices) => {
            run_scripted(&handle, indices, intro.question_count);
            run.join().await
        }
        None => {
            let quit = run_interactive(&handle).await?;
            if quit {
                drop(handle);
                let _ = run.join().await;
                println!("Attempt abandoned; nothing saved.");
                return Ok(());
            }
            run.join().await
        }
    };

    let Some(completion) = completion else {
        println!("Attempt abandoned; nothing saved.");
        return Ok(());
    };

    match &completion {
        Completion::Submitted(review) => {
            println!("{}", render_review(&review.summary, &review.rows()));
        }
        Completion::TimedOut(summary) => {
            println!("Time's up!");
            println!("{}", render_result(summary));
            println!("Review is not available for timed-out attempts.");
        }
    }

    // Persist the attempt
    let report = AttemptReport::from_completion(&completion, &resolved.module_title);
    let out_dir = output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = out_dir.join(format!("attempt-{timestamp}.json"));
    report.save_json(&path)?;
    eprintln!("Attempt saved to: {}", path.display());

    if html {
        let html_path = path.with_extension("html");
        write_html_report(&report, &html_path)?;
        eprintln!("HTML review: {}", html_path.display());
    }

    Ok(())
}

/// Parse `--answers` into zero-based option indices.
fn parse_answers(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("invalid answer index: '{}'", part.trim()))
        })
        .collect()
}

/// Feed scripted answers to the session. A fully answered quiz is submitted
/// immediately; a partial script leaves the clock to expire.
fn run_scripted(handle: &SessionHandle, indices: &[usize], total: usize) {
    for (i, &answer) in indices.iter().enumerate() {
        handle.send(ExamEvent::SelectAnswer(answer));
        if i + 1 < total {
            handle.send(ExamEvent::Next);
        }
    }

    if indices.len() == total {
        handle.send(ExamEvent::RequestSubmit);
        handle.send(ExamEvent::ConfirmSubmit);
    } else {
        eprintln!(
            "{} of {total} answers scripted; waiting for the clock to run out.",
            indices.len()
        );
    }
}

enum Input {
    Event(ExamEvent),
    Quit,
    Help,
}

fn parse_input(input: &str, view: &ExamView) -> Input {
    if view.phase == Phase::ConfirmingSubmit {
        return match input {
            "y" | "yes" => Input::Event(ExamEvent::ConfirmSubmit),
            "n" | "no" => Input::Event(ExamEvent::CancelSubmit),
            "q" | "quit" => Input::Quit,
            _ => Input::Help,
        };
    }

    match input {
        "n" | "next" => Input::Event(ExamEvent::Next),
        "p" | "prev" | "previous" => Input::Event(ExamEvent::Previous),
        "s" | "submit" => Input::Event(ExamEvent::RequestSubmit),
        "q" | "quit" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= view.options.len() => {
                Input::Event(ExamEvent::SelectAnswer(n - 1))
            }
            _ => Input::Help,
        },
    }
}

fn render(view: &ExamView) {
    println!();
    if view.phase == Phase::ConfirmingSubmit {
        println!(
            "Submit quiz? You can't change your answers later ({}/{} answered). [y/n]",
            view.answered, view.total_questions
        );
        return;
    }

    println!(
        "[{}] Question {} of {}",
        format_clock(view.remaining_secs),
        view.current_index + 1,
        view.total_questions
    );
    println!("{}", view.prompt);
    for (i, option) in view.options.iter().enumerate() {
        let marker = if Some(i) == view.chosen { '>' } else { ' ' };
        println!(" {marker} {}. {option}", i + 1);
    }
}

fn help_line(view: &ExamView) {
    println!(
        "Commands: 1-{} select, n next, p previous, s submit, q quit",
        view.options.len()
    );
}

/// Drive the session from stdin until it completes. Returns `true` when the
/// user walked away from the attempt.
async fn run_interactive(handle: &SessionHandle) -> Result<bool> {
    let mut view = handle.view();

    // Blocking stdin reader on its own thread; lines flow into the async
    // loop over a channel.
    let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let snapshot = view.borrow().clone();
    render(&snapshot);
    help_line(&snapshot);
    let mut last = (snapshot.phase, snapshot.current_index, snapshot.chosen);

    loop {
        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                let v = view.borrow_and_update().clone();
                if v.phase == Phase::Completed {
                    break;
                }
                let key = (v.phase, v.current_index, v.chosen);
                if key != last {
                    last = key;
                    render(&v);
                }
            }
            line = lines.recv() => {
                let Some(line) = line else { return Ok(true) };
                let v = view.borrow().clone();
                if v.phase == Phase::Completed {
                    break;
                }
                match parse_input(line.trim(), &v) {
                    Input::Event(event) => {
                        handle.send(event);
                    }
                    Input::Quit => return Ok(true),
                    Input::Help => help_line(&v),
                }
            }
        }
    }

    Ok(false)
}
