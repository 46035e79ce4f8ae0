//! The `quizflow init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizflow.toml
    if std::path::Path::new("quizflow.toml").exists() {
        println!("quizflow.toml already exists, skipping.");
    } else {
        std::fs::write("quizflow.toml", SAMPLE_CONFIG)?;
        println!("Created quizflow.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("catalog")?;
    let example_path = std::path::Path::new("catalog/example.toml");
    if example_path.exists() {
        println!("catalog/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalog/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizflow validate --catalog catalog/example.toml");
    println!("  2. Run: quizflow list --catalog catalog");
    println!("  3. Run: quizflow take --catalog catalog --course rust-101 --module ownership");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizflow configuration

output_dir = "./attempts"

[catalog]
type = "file"
path = "catalog"

# Use an HTTP catalog service instead:
# [catalog]
# type = "http"
# base_url = "https://lms.example.com/api"
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
name = "Example Catalog"
description = "A small catalog to get started"

[[courses]]
id = "rust-101"
title = "Rust Fundamentals"
description = "An introduction to the Rust programming language"

[[courses.modules]]
id = "ownership"
title = "Ownership"

[courses.modules.quiz]
points = 30
time_limit_secs = 600

[[courses.modules.quiz.questions]]
prompt = "What happens to a value when it is assigned to another variable?"
options = ["It is copied", "It is moved", "It is borrowed"]
correct = 1

[[courses.modules.quiz.questions]]
prompt = "How many mutable references to a value can exist at one time?"
options = ["One", "Two", "Unlimited"]
correct = 0

[[courses.modules.quiz.questions]]
prompt = "When is a value dropped?"
options = ["At the end of the program", "When its last reference is read", "When its owner goes out of scope"]
correct = 2

[[courses.modules]]
id = "error-handling"
title = "Error Handling"

[courses.modules.quiz]
points = 20
time_limit_secs = 300

[[courses.modules.quiz.questions]]
prompt = "Which type represents a recoverable failure?"
options = ["Result", "Option", "panic!"]
correct = 0

[[courses.modules.quiz.questions]]
prompt = "What does the ? operator do on an Err value?"
options = ["Panics", "Returns it to the caller", "Ignores it"]
correct = 1
"#;
