use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use xlabs::core::config::{self, ResolvedConfig};
use xlabs::serialization::{SerializationFormat, StreamSerializer, serializer_for};
use xlabs::speech::{ConsoleSpeechEngine, TextToSpeechService};

#[derive(Parser)]
#[command(name = "xlabs", about = "Serialization and speech services from the command line")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode a document between self-describing formats
    Convert {
        /// Input format (defaults to the configured format)
        #[arg(long, value_enum)]
        from: Option<SerializationFormat>,
        /// Output format
        #[arg(long, value_enum)]
        to: SerializationFormat,
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print text output
        #[arg(long)]
        pretty: bool,
    },
    /// Speak text through the console speech engine
    Speak {
        text: String,
        /// Use the first configured voice for this language
        #[arg(short, long)]
        language: Option<String>,
    },
    /// List the languages of the configured voices
    Voices,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to xlabs.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("xlabs.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config()?;

    match args.command {
        Command::Convert {
            from,
            to,
            input,
            output,
            pretty,
        } => {
            let resolved = config::resolve(&file_config, from, pretty.then_some(true));
            log::info!("Converting {} -> {to}", resolved.format);
            convert(&resolved, to, input, output)
        }
        Command::Speak { text, language } => {
            let resolved = config::resolve(&file_config, None, None);
            let tts = speech_service(&resolved);
            match language {
                Some(language) => tts.speak_in(&text, &language).await?,
                None => tts.speak(&text).await?,
            }
            Ok(())
        }
        Command::Voices => {
            let resolved = config::resolve(&file_config, None, None);
            for language in speech_service(&resolved).installed_languages() {
                println!("{language}");
            }
            Ok(())
        }
    }
}

fn speech_service(resolved: &ResolvedConfig) -> TextToSpeechService {
    TextToSpeechService::new(Arc::new(ConsoleSpeechEngine::new(resolved.voices.clone())))
}

/// Decodes into a generic value tree, then encodes that in the target format.
fn convert(
    resolved: &ResolvedConfig,
    to: SerializationFormat,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    for format in [resolved.format, to] {
        if !format.is_self_describing() {
            return Err(format!("{format} is not self-describing, convert needs json or toml").into());
        }
    }

    let mut reader: Box<dyn Read> = match input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let mut source = serializer_for(resolved.format, false);
    let value: serde_json::Value = source.deserialize(&mut reader)?;
    source.flush();

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut target = serializer_for(to, resolved.pretty);
    target.serialize(&value, &mut writer)?;
    writeln!(writer)?;
    writer.flush()?;
    target.flush();
    Ok(())
}
