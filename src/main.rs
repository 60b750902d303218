//! Spark - AI social media content generation from your terminal
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use spark::{
    Action, Config, ContentType, GeneratedContent, GenerationClient, GenerationRequest,
    HistoryStore, Platform, PublishDispatcher, PublishError, PublishOutcome, Session,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Generate {
            prompt,
            platform,
            content_type,
        } => generate_cli(prompt, platform, content_type).await,
        Command::History { limit } => history_cli(limit),
        Command::Show { id } => show_cli(&id),
        Command::Remove { id } => remove_cli(&id),
        Command::Clear => clear_cli(),
        Command::Copy { id } => copy_cli(&id),
        Command::Download { id, path } => download_cli(&id, path.as_deref()),
        Command::Publish { id } => publish_cli(&id).await,
        Command::Share { id } => share_cli(&id),
        Command::Connect { platform } => connect_cli(platform),
        Command::Disconnect { platform } => disconnect_cli(platform),
        Command::Platforms => platforms_cli(),
        Command::Templates => {
            templates_cli();
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Generate {
        prompt: String,
        platform: Platform,
        content_type: ContentType,
    },
    History {
        limit: usize,
    },
    Show {
        id: String,
    },
    Remove {
        id: String,
    },
    Clear,
    Copy {
        id: String,
    },
    Download {
        id: String,
        path: Option<String>,
    },
    Publish {
        id: String,
    },
    Share {
        id: String,
    },
    Connect {
        platform: Platform,
    },
    Disconnect {
        platform: Platform,
    },
    Platforms,
    Templates,
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    if args.len() == 1 {
        return Ok(Command::Help);
    }

    let id_arg = || {
        args.get(2)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Missing content id\nRun 'spark history' to list ids"))
    };
    let platform_arg = || {
        let name = args
            .get(2)
            .ok_or_else(|| anyhow::anyhow!("Missing platform (linkedin, instagram, facebook, youtube)"))?;
        parse_platform(name)
    };

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "generate" | "gen" | "g" => {
            let mut platform = Platform::default();
            let mut content_type = ContentType::default();
            let mut template = None;
            let mut words = Vec::new();

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "-p" | "--platform" => {
                        let value = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing value for {}", args[i]))?;
                        platform = parse_platform(value)?;
                        i += 2;
                    }
                    "-t" | "--type" => {
                        let value = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing value for {}", args[i]))?;
                        content_type = ContentType::from_str(value).ok_or_else(|| {
                            anyhow::anyhow!("Unknown content type: {}\nSupported: text, image, video", value)
                        })?;
                        i += 2;
                    }
                    "--template" => {
                        let value = args
                            .get(i + 1)
                            .ok_or_else(|| anyhow::anyhow!("Missing value for --template"))?;
                        template = Some(spark::templates::find(value).ok_or_else(|| {
                            anyhow::anyhow!("Unknown template: {}\nRun 'spark templates' to list them", value)
                        })?);
                        i += 2;
                    }
                    word => {
                        words.push(word.to_string());
                        i += 1;
                    }
                }
            }

            let prompt = match template {
                Some(_) if !words.is_empty() => anyhow::bail!(
                    "Use either a prompt or --template, not both (got \"{}\")",
                    words.join(" ")
                ),
                Some(t) => t.prompt.to_string(),
                None => words.join(" "),
            };
            if prompt.trim().is_empty() {
                anyhow::bail!("Missing prompt\nExample: spark generate \"Announce our new app\" -p linkedin");
            }

            Ok(Command::Generate {
                prompt,
                platform,
                content_type,
            })
        }

        "history" | "hist" | "ls" => {
            let limit = args
                .iter()
                .position(|a| a == "--limit" || a == "-l")
                .and_then(|i| args.get(i + 1))
                .and_then(|s| s.parse().ok())
                .unwrap_or(10);
            Ok(Command::History { limit })
        }

        "show" => Ok(Command::Show { id: id_arg()? }),
        "remove" | "rm" | "delete" => Ok(Command::Remove { id: id_arg()? }),
        "clear" => Ok(Command::Clear),
        "copy" | "cp" => Ok(Command::Copy { id: id_arg()? }),
        "download" | "export" => Ok(Command::Download {
            id: id_arg()?,
            path: args.get(3).cloned(),
        }),
        "publish" => Ok(Command::Publish { id: id_arg()? }),
        "share" => Ok(Command::Share { id: id_arg()? }),
        "connect" => Ok(Command::Connect {
            platform: platform_arg()?,
        }),
        "disconnect" => Ok(Command::Disconnect {
            platform: platform_arg()?,
        }),
        "platforms" => Ok(Command::Platforms),
        "templates" => Ok(Command::Templates),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'spark --help' for usage"
        )),
    }
}

fn parse_platform(name: &str) -> Result<Platform> {
    Platform::from_str(name).ok_or_else(|| {
        anyhow::anyhow!("Unknown platform: {}\nSupported: linkedin, instagram, facebook, youtube", name)
    })
}

fn print_help() {
    let config_path = spark::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
✨ Spark - AI social media content generator

USAGE:
    spark [COMMAND]

COMMANDS:
    generate <prompt> [OPTIONS]        Generate a post
      Options:
        -p, --platform <platform>      linkedin, instagram, facebook, youtube (default: linkedin)
        -t, --type <type>              text, image, video (default: text)
        --template <n|label>           Use a built-in prompt template
      Examples:
        spark generate "Announce our new app" -p instagram -t image
        spark generate --template 4 -p linkedin

    history [--limit n]                List recent creations (default: 10)
    show <id>                          Show a creation
    remove <id>                        Delete a creation
    clear                              Delete all history
    copy <id>                          Copy the text to the clipboard
    download <id> [path]               Save the text and media links to a file

    publish <id>                       Post through the connected account
                                       (opens the connection page if none)
    share <id>                         Copy the text and open the share page
    connect <platform>                 Connect an account
    disconnect <platform>              Forget a connected account

    platforms                          List platforms and their limits
    templates                          List prompt templates

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

IDS:
    Any unambiguous prefix of an id works (e.g. spark show 3f2a)

CONFIG:
    {}
"#,
        spark::LOGO,
        config_path
    );
}

fn print_version() {
    println!("spark {}", spark::VERSION);
}

fn open_session(config: &Config) -> Result<Session> {
    Ok(Session::open(HistoryStore::open(config)?))
}

fn select(session: &mut Session, id: &str) -> Result<GeneratedContent> {
    session.dispatch(Action::Select(id.to_string()))?;
    let state = session.state();
    state.current.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "{}",
            state
                .status
                .clone()
                .unwrap_or_else(|| format!("No history entry matches '{id}'"))
        )
    })
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn print_content(content: &GeneratedContent) {
    let info = content.platform.info();
    println!(
        "\n{} {} {} post  ·  {}  ·  {}",
        content.platform.emoji(),
        info.name,
        content.content_type,
        content.id,
        content.relative_time()
    );
    println!("{}", "─".repeat(60));
    println!("{}", textwrap::fill(&content.text, 72));
    if let Some(url) = &content.media_url {
        println!("\n🖼  {}", url);
    }
    if let Some(url) = &content.video_url {
        println!("\n🎬 {}", url);
    }
    println!("{}", "─".repeat(60));

    let len = content.text.chars().count();
    if content.exceeds_limit() {
        println!("⚠ {} characters, over the {} limit of {}", len, info.name, info.max_length);
    } else {
        println!("{} / {} characters", len, info.max_length);
    }
}

async fn generate_cli(prompt: String, platform: Platform, content_type: ContentType) -> Result<()> {
    let config = Config::load()?;
    let request = GenerationRequest::new(platform, prompt, content_type)?;
    let mut session = open_session(&config)?;

    session.dispatch(Action::GenerationStarted)?;
    println!(
        "{} Crafting your {} {} post...",
        platform.emoji(),
        platform.name(),
        content_type.as_str().to_lowercase()
    );

    let client = GenerationClient::from_config(&config);
    let content = client.generate(request).await;
    session.append(content.clone())?;

    print_content(&content);
    Ok(())
}

fn history_cli(limit: usize) -> Result<()> {
    let config = Config::load()?;
    let session = open_session(&config)?;
    let history = &session.state().history;

    if history.is_empty() {
        println!("No creations yet.");
        println!("\nGenerate one with:");
        println!("  spark generate \"Announce our new app\" -p linkedin");
        return Ok(());
    }

    println!("Recent creations ({} of {}):\n", history.len().min(limit), history.len());
    for content in history.entries().iter().take(limit) {
        println!(
            "  {} {:<8} {:<5} {:>4}  {}",
            content.platform.emoji(),
            short_id(&content.id),
            content.content_type,
            content.relative_time(),
            content.preview(50)
        );
    }

    Ok(())
}

fn show_cli(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let content = select(&mut session, id)?;
    println!("Prompt: {}", content.prompt);
    print_content(&content);
    Ok(())
}

fn remove_cli(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let full_id = session
        .state()
        .history
        .find(id)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No history entry matches '{id}'"))?;

    session.remove(&full_id)?;
    println!("✓ Deleted {}", short_id(&full_id));
    Ok(())
}

fn clear_cli() -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let count = session.state().history.len();
    session.clear()?;
    println!("✓ Deleted {} creations", count);
    Ok(())
}

fn copy_cli(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let content = select(&mut session, id)?;

    PublishDispatcher::from_config(&config).copy_text(&content)?;
    println!("✓ Copied to clipboard");
    Ok(())
}

fn download_cli(id: &str, path: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let content = select(&mut session, id)?;

    let path = path.map_or_else(
        || format!("spark-{}.txt", short_id(&content.id)),
        String::from,
    );
    std::fs::write(&path, content.to_export_text())
        .with_context(|| format!("Failed to write {path}"))?;
    println!("✓ Saved to {}", path);
    Ok(())
}

async fn publish_cli(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let content = select(&mut session, id)?;
    let platform = content.platform;

    println!("{} Publishing to {}...", platform.emoji(), platform.name());
    match PublishDispatcher::from_config(&config).publish(&content).await {
        Ok(PublishOutcome::Posted { platform }) => {
            println!("✓ Posted to {}", platform.name());
        }
        Ok(PublishOutcome::ConnectRedirect { url }) => {
            println!("No {} account connected for this post.", platform.name());
            println!("\n📋 Authorize in your browser:\n\n  {}\n", url);
            println!("Then run: spark connect {}", platform.slug());
            println!("Posts generated after connecting can be published directly.");
        }
        Err(e) => report_publish_error(&e, platform),
    }
    Ok(())
}

fn share_cli(id: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let content = select(&mut session, id)?;

    match PublishDispatcher::from_config(&config).manual_publish(&content) {
        Ok(share) => {
            if share.copied {
                println!("✓ Text copied to clipboard");
            } else {
                println!("⚠ Could not copy to clipboard; use 'spark show' to copy manually");
            }
            println!("✓ Opened {}", share.url);
        }
        Err(e) => report_publish_error(&e, content.platform),
    }
    Ok(())
}

fn report_publish_error(error: &PublishError, platform: Platform) {
    println!("⚠ {}", error);
    match error {
        PublishError::PopupBlocked { url } => {
            println!("\nOpen it manually:\n\n  {}\n", url);
        }
        PublishError::DirectPostUnsupported(_) | PublishError::TextTooLong { .. } => {
            println!("Try: spark share <id>  (manual publish to {})", platform.name());
        }
        PublishError::DirectPost(_) => {
            println!("Nothing was changed; run the command again to retry.");
        }
    }
}

fn connect_cli(platform: Platform) -> Result<()> {
    let mut config = Config::load()?;

    println!("{} Connecting {}...", platform.emoji(), platform.name());
    match PublishDispatcher::from_config(&config).connect(platform) {
        Ok(url) => println!("\n📋 Authorize in your browser:\n\n  {}\n", url),
        Err(e) => println!("⚠ {}\n", e),
    }

    println!("Press Enter once authorization is complete (Ctrl+C to cancel):");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    config.connect(platform);
    config.save()?;
    println!("✓ {} connected", platform.name());
    if !config.allows_direct_post(platform) {
        println!("ℹ {} has no direct-post API; use 'spark share' to publish", platform.name());
    }
    Ok(())
}

fn disconnect_cli(platform: Platform) -> Result<()> {
    let mut config = Config::load()?;
    config.disconnect(platform);
    config.save()?;
    println!("✓ {} disconnected", platform.name());
    Ok(())
}

fn platforms_cli() -> Result<()> {
    let config = Config::load()?;

    println!("Platforms:\n");
    for platform in Platform::all() {
        let info = platform.info();
        let mut media = Vec::new();
        if info.supports_image {
            media.push("image");
        }
        if info.supports_video {
            media.push("video");
        }
        let connected = if config.is_connected(*platform) {
            " (connected)"
        } else {
            ""
        };
        let direct = if config.allows_direct_post(*platform) {
            "direct post"
        } else {
            "share only"
        };
        println!(
            "  {} {}{}\n    Color: {}  ·  Max length: {}  ·  Media: {}  ·  {}",
            platform.emoji(),
            info.name,
            connected,
            info.color,
            info.max_length,
            media.join(", "),
            direct
        );
    }
    Ok(())
}

fn templates_cli() {
    println!("Templates:\n");
    for (i, template) in spark::templates::TEMPLATES.iter().enumerate() {
        println!("  {}. {} {}", i + 1, template.emoji, template.label);
        println!("     {}", template.prompt);
    }
    println!("\nUse one with: spark generate --template <n> -p <platform>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &[&str]) -> Vec<String> {
        std::iter::once("spark")
            .chain(line.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_generate_from_words() {
        let command = parse_args(&args(&["generate", "Launch", "day", "-p", "youtube"])).unwrap();
        assert_eq!(
            command,
            Command::Generate {
                prompt: "Launch day".to_string(),
                platform: Platform::YouTube,
                content_type: ContentType::Text,
            }
        );
    }

    #[test]
    fn test_generate_from_template() {
        let command = parse_args(&args(&["gen", "--template", "1", "-t", "image"])).unwrap();
        assert_eq!(
            command,
            Command::Generate {
                prompt: spark::templates::TEMPLATES[0].prompt.to_string(),
                platform: Platform::LinkedIn,
                content_type: ContentType::Image,
            }
        );
    }

    #[test]
    fn test_template_with_words_is_rejected() {
        let err = parse_args(&args(&["generate", "--template", "1", "some", "words"])).unwrap_err();
        assert!(err.to_string().contains("not both"));

        let err = parse_args(&args(&["generate", "extra", "--template", "tech tip"])).unwrap_err();
        assert!(err.to_string().contains("extra"));
    }

    #[test]
    fn test_missing_prompt_and_unknown_command() {
        assert!(parse_args(&args(&["generate", "-p", "facebook"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Help);
    }
}
