use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lipi_cli::commands::{config_ops, convert_ops, typing_ops};

#[derive(Parser)]
#[command(name = "lipitool", about = "Lipi transliteration and typing tool")]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text between scripts
    Convert {
        /// Source script, language or alias
        #[arg(long)]
        from: String,
        /// Target script, language or alias
        #[arg(long)]
        to: String,
        /// Enable a custom option (repeatable)
        #[arg(long = "option")]
        options: Vec<String>,
        /// Text to convert
        text: String,
    },
    /// Type Normal keys into a script one key at a time
    Type {
        /// Target script, language or alias
        #[arg(long)]
        script: String,
        /// Consonants carry an inherent vowel
        #[arg(long)]
        inherent: bool,
        /// Keep ASCII digits
        #[arg(long)]
        latin_digits: bool,
        /// Print the diff of every key
        #[arg(long)]
        steps: bool,
        /// Keys to type
        text: String,
    },
    /// List scripts and languages
    Scripts,
    /// List custom options
    Options {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the keys that type each character of a script
    TypingMap {
        /// Script, language or alias
        script: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Check a settings TOML file
    SettingsValidate {
        /// Path to the settings file
        file: String,
    },
}

fn init_stderr_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lipi_core=debug,lipi_session=debug")),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_stderr_tracing(cli.verbose);

    match cli.command {
        Command::Convert {
            from,
            to,
            options,
            text,
        } => convert_ops::convert_cmd(&from, &to, &options, &text),
        Command::Type {
            script,
            inherent,
            latin_digits,
            steps,
            text,
        } => typing_ops::type_cmd(&script, inherent, latin_digits, steps, &text),
        Command::Scripts => convert_ops::scripts_cmd(),
        Command::Options { json } => convert_ops::options_cmd(json),
        Command::TypingMap { script, json } => typing_ops::typing_map_cmd(&script, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
