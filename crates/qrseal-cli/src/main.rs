//! qrseal: seal a text payload into a password-encrypted QR code
//!
//! Usage:
//!   qrseal [--input payload.txt] [--out sealed.png] [--size 1000]
//!   qrseal --text     # print the decryption command instead of a PNG
//!   qrseal --json     # print the structured artifact fields
//!
//! The payload is read from --input or stdin, the password is prompted
//! without echo, and the resulting QR code contains a one-line php
//! command that decrypts the payload on any machine with openssl,
//! after prompting for the same password. Key derivation runs 10
//! million PBKDF2 iterations and takes a few seconds by design.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use secrecy::SecretString;
use tracing::info;

use qrseal_core::SealError;
use qrseal_crypto::{artifact, seal, InstructionFormatter, PhpOpensslFormatter, SealedArtifact};
use qrseal_qr::{encode, write_png, ErrorCorrection, RenderOptions};

#[derive(Parser, Debug)]
#[command(
    name = "qrseal",
    version,
    about = "Seal a text payload into a password-encrypted QR code",
    long_about = "qrseal: derive an AES-256 key from a password, encrypt a text payload, \
                  and render the self-describing decryption command as a QR code PNG"
)]
struct Cli {
    /// Read the payload from this file instead of stdin
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, short = 'o', default_value = "sealed.png")]
    out: PathBuf,

    /// Error-correction level (higher levels shrink the usable payload)
    #[arg(long, value_enum, default_value = "low")]
    ec_level: EcArg,

    /// Square canvas size in pixels
    #[arg(long, env = "QRSEAL_SIZE", default_value_t = 1000)]
    size: u32,

    /// Print the sealed decryption command to stdout instead of a PNG
    #[arg(long, conflicts_with = "json")]
    text: bool,

    /// Print the structured artifact fields as JSON instead of a PNG
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "QRSEAL_LOG", default_value = "warn")]
    log: String,

    /// Log format (json, text)
    #[arg(long, env = "QRSEAL_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EcArg {
    /// ~7% recovery, maximum capacity (default)
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl From<EcArg> for ErrorCorrection {
    fn from(arg: EcArg) -> Self {
        match arg {
            EcArg::Low => ErrorCorrection::Low,
            EcArg::Medium => ErrorCorrection::Medium,
            EcArg::Quartile => ErrorCorrection::Quartile,
            EcArg::High => ErrorCorrection::High,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log, &cli.log_format);

    let plaintext = read_payload(cli.input.as_deref()).await?;
    if plaintext.is_empty() {
        bail!("payload to encrypt is missing: provide content via --input or stdin");
    }

    let password = rpassword::prompt_password("Password: ").context("reading password")?;
    if password.is_empty() {
        bail!("password is missing: provide a password to encrypt your content");
    }
    let password = SecretString::from(password);

    // The KDF blocks for seconds; run the whole seal off the runtime
    // threads and keep the spinner responsive meanwhile.
    let spinner = ProgressBar::new_spinner().with_message("deriving key and encrypting...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let sealed = tokio::task::spawn_blocking(move || -> Result<SealedArtifact, SealError> {
        let output = seal(&plaintext, &password)?;
        Ok(artifact::encode(&output))
    })
    .await
    .context("seal task panicked")?;
    spinner.finish_and_clear();

    let sealed = sealed.map_err(present)?;
    info!(
        cipher = sealed.cipher,
        ciphertext_b64_len = sealed.cipher_text_b64.len(),
        "payload sealed"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sealed)?);
        return Ok(());
    }

    let command = PhpOpensslFormatter.format(&sealed);
    if cli.text {
        println!("{command}");
        return Ok(());
    }

    let matrix = encode(&command, cli.ec_level.into()).map_err(present)?;
    let opts = RenderOptions {
        width: cli.size,
        height: cli.size,
        ..RenderOptions::default()
    };
    let mut sink = File::create(&cli.out)
        .with_context(|| format!("creating {}", cli.out.display()))?;
    write_png(&matrix, &opts, &mut sink).map_err(present)?;

    eprintln!(
        "Wrote {}; verify that you can successfully decrypt the content \
         before relying on the QR code.",
        cli.out.display()
    );
    Ok(())
}

/// Read the payload from a file or, if none was given, from stdin.
async fn read_payload(input: Option<&std::path::Path>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading payload from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading payload from stdin")?;
            Ok(buf)
        }
    }
}

/// Map each failure kind to an actionable user-facing message.
fn present(err: SealError) -> anyhow::Error {
    let hint = match &err {
        SealError::Entropy(_) => "the OS random source is misbehaving; retry on a healthy machine",
        SealError::KeyDerivation(_) | SealError::Encryption(_) => {
            "try again with a different message or password"
        }
        SealError::CapacityExceeded { .. } => {
            "the sealed command does not fit in a QR code; shorten the message or lower --ec-level"
        }
        SealError::Render(_) => "the QR bitmap could not be produced",
        SealError::SinkWrite(_) => "could not write the output image",
    };
    anyhow::Error::new(err).context(hint)
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .init();
        }
    }
}
