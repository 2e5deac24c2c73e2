use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use qr_inspect::cache::CachedInspector;
use qr_inspect::classifier::ContentClassifier;
use qr_inspect::config::Config;
use qr_inspect::content::{ContentType, ParsedContent, ParsedData};
use qr_inspect::payload::{build_payload, PayloadRequest};
use qr_inspect::safety::{SecurityAnalysis, UrlSafetyChecker};
use serde::Serialize;
use std::io::{self, BufRead};
use std::process;

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    #[serde(flatten)]
    content: &'a ParsedContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    safety: Option<&'a SecurityAnalysis>,
}

fn main() {
    let matches = Command::new("qr-inspect")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Classify decoded QR content and score the risk of embedded URLs")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Decoded QR text to classify (reads lines from stdin when omitted)")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("check-url")
                .long("check-url")
                .value_name("URL")
                .help("Score a single URL without classifying it")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("make")
                .long("make")
                .value_name("JSON")
                .help("Build a QR payload from a JSON request, e.g. {\"type\":\"url\",\"url\":\"https://example.com\"}")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        config.log_level()
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let json = matches.get_flag("json");
    let max_length = config.payload.max_length;

    if let Some(request) = matches.get_one::<String>("make") {
        if let Err(e) = make_payload(request, max_length) {
            eprintln!("Error building payload: {e:#}");
            process::exit(1);
        }
        return;
    }

    let inspector = CachedInspector::new(
        ContentClassifier::new(),
        UrlSafetyChecker::with_lists(config.safety.clone()),
        &config.cache,
    );

    if let Some(url) = matches.get_one::<String>("check-url") {
        let analysis = inspector.check_url(url);
        if json {
            print_json(&analysis);
        } else {
            print_analysis(&analysis);
        }
        return;
    }

    let inputs: Vec<String> = match matches.get_many::<String>("input") {
        Some(values) => values.cloned().collect(),
        None => read_stdin_lines(),
    };

    for input in &inputs {
        if input.chars().count() > max_length {
            log::warn!(
                "Skipping input of {} characters, the limit is {}",
                input.chars().count(),
                max_length
            );
            continue;
        }
        inspect(&inspector, input, json);
    }

    log::debug!("{} cached results", inspector.cached_entries());
}

fn read_stdin_lines() -> Vec<String> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) if !line.trim().is_empty() => lines.push(line),
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read stdin: {e}");
                break;
            }
        }
    }
    lines
}

fn inspect(inspector: &CachedInspector, input: &str, json: bool) {
    let content = inspector.classify(input);
    let safety = match &content.data {
        ParsedData::Url(url) => Some(inspector.check_url(&url.url)),
        _ => None,
    };

    if json {
        print_json(&Report {
            input,
            content: &content,
            safety: safety.as_ref(),
        });
        return;
    }

    println!("{}: {}", content.content_type(), summarize(&content.data));
    for action in &content.actions {
        println!("  [{}] {}", action.icon, action.label);
    }
    if let Some(analysis) = &safety {
        print_analysis(analysis);
    }
    if content.content_type() != ContentType::Text {
        println!();
    }
}

fn summarize(data: &ParsedData) -> String {
    match data {
        ParsedData::Url(url) => format!("{} ({})", url.url, url.domain),
        ParsedData::Email(email) => match &email.subject {
            Some(subject) => format!("{} [{}]", email.email, subject),
            None => email.email.clone(),
        },
        ParsedData::Phone(phone) => phone.formatted.clone(),
        ParsedData::Sms(sms) => match &sms.message {
            Some(message) => format!("{}: {}", sms.phone, message),
            None => sms.phone.clone(),
        },
        ParsedData::Wifi(wifi) => format!(
            "{} ({}{})",
            wifi.ssid,
            wifi.security.as_str(),
            if wifi.hidden { ", hidden" } else { "" }
        ),
        ParsedData::VCard(card) => card
            .fields()
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(", "),
        ParsedData::Text(text) => truncate_string(&text.text, 80),
    }
}

fn print_analysis(analysis: &SecurityAnalysis) {
    let verdict = if analysis.is_safe { "safe" } else { "unsafe" };
    println!("  risk: {} ({})", analysis.risk_level, verdict);
    for (warning, recommendation) in analysis.warnings.iter().zip(&analysis.recommendations) {
        println!("  ! {warning}");
        println!("    {recommendation}");
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => log::error!("Failed to serialize result: {e}"),
    }
}

fn make_payload(request: &str, max_length: usize) -> anyhow::Result<()> {
    let request: PayloadRequest = serde_json::from_str(request)?;
    let payload = build_payload(&request, max_length)?;
    println!("{payload}");
    Ok(())
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
