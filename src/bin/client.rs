use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::RngCore;
use schnorr_nizk::{
    BigUint, GroupContext, ProofMessage, Prover, Rfc5114Group, SecureRng, Verifier, Witness,
};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "client")]
#[command(about = "Schnorr NIZK proof client", long_about = None)]
#[command(version)]
struct Cli {
    /// Group preset for local proving (`submit` uses the server's group)
    #[arg(short, long, env = "NIZK_GROUP", default_value = "rfc5114-1024-160")]
    group: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OtherInfoArgs {
    /// Other info bound into the transcript
    #[arg(long, conflicts_with = "other_info_file")]
    other_info: Option<String>,

    /// File whose contents are bound into the transcript (e.g. a PEM certificate)
    #[arg(long)]
    other_info_file: Option<PathBuf>,
}

impl OtherInfoArgs {
    fn load(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        match (&self.other_info, &self.other_info_file) {
            (Some(value), _) => Ok(value.as_bytes().to_vec()),
            (None, Some(path)) => Ok(std::fs::read(path)?),
            (None, None) => Err("One of --other-info or --other-info-file is required".into()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a proof and print it as JSON
    Prove {
        /// Secret exponent as hex; a fresh secret is drawn when omitted
        #[arg(long)]
        secret_hex: Option<String>,

        /// Identifier bound into the proof; defaults to 32 random bytes as hex
        #[arg(short, long)]
        identifier: Option<String>,

        #[command(flatten)]
        other_info: OtherInfoArgs,
    },

    /// Verify a JSON proof read from a file or stdin
    Verify {
        /// Proof file; stdin when omitted
        #[arg(short, long)]
        proof: Option<PathBuf>,

        #[command(flatten)]
        other_info: OtherInfoArgs,
    },

    /// Generate a proof and submit it to a verification server
    #[cfg(feature = "grpc")]
    Submit {
        /// Server URL
        #[arg(short, long, default_value = "http://127.0.0.1:50051")]
        server: String,

        /// Secret exponent as hex; a fresh secret is drawn when omitted
        #[arg(long)]
        secret_hex: Option<String>,

        /// Identifier bound into the proof; defaults to 32 random bytes as hex
        #[arg(short, long)]
        identifier: Option<String>,

        #[command(flatten)]
        other_info: OtherInfoArgs,
    },
}

fn witness_from_hex(secret_hex: Option<&str>) -> Result<Witness, Box<dyn std::error::Error>> {
    match secret_hex {
        Some(hex_str) => {
            let bytes = hex::decode(hex_str.trim_start_matches("0x"))?;
            Ok(Witness::Pinned(BigUint::from_bytes_be(&bytes)))
        }
        None => Ok(Witness::Fresh),
    }
}

fn random_identifier(rng: &mut SecureRng) -> String {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn prove(
    ctx: &GroupContext,
    secret_hex: Option<&str>,
    identifier: Option<String>,
    other_info: &[u8],
) -> Result<ProofMessage, Box<dyn std::error::Error>> {
    let mut rng = SecureRng::checked()?;
    let witness = witness_from_hex(secret_hex)?;
    let identifier = identifier.unwrap_or_else(|| random_identifier(&mut rng));

    let mut prover = Prover::new(ctx, witness, &mut rng)?;
    let transcript = prover.transcript(&identifier, other_info);
    debug!(transcript_len = transcript.as_bytes().len(), "transcript bound");

    prover.compute_response(transcript.as_bytes())?;
    Ok(prover.to_message(identifier)?)
}

fn print_proof(
    ctx: &GroupContext,
    secret_hex: Option<&str>,
    identifier: Option<String>,
    other_info: &OtherInfoArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let message = prove(ctx, secret_hex, identifier, &other_info.load()?)?;
    println!("{}", message.to_json()?);
    Ok(())
}

fn verify_proof(
    ctx: &GroupContext,
    proof: Option<PathBuf>,
    other_info: &OtherInfoArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = match proof {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let message = ProofMessage::from_json(&body)?;
    let accepted = Verifier::new(ctx).verify_message(&message, &other_info.load()?)?;

    if accepted {
        println!("Success: proof for '{}' verified", message.identifier());
        Ok(())
    } else {
        eprintln!("Failed: proof for '{}' rejected", message.identifier());
        std::process::exit(1);
    }
}

#[cfg(feature = "grpc")]
async fn submit_proof(
    server: String,
    secret_hex: Option<&str>,
    identifier: Option<String>,
    other_info: &OtherInfoArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    use schnorr_nizk::proto::nizk_verifier_client::NizkVerifierClient;
    use schnorr_nizk::proto::{GroupInfoRequest, VerifyRequest};
    use schnorr_nizk::GroupParameters;

    let mut client = NizkVerifierClient::connect(server.clone()).await?;

    // Prove in the server's group so the bound g matches.
    let info = client
        .group_info(tonic::Request::new(GroupInfoRequest {}))
        .await?
        .into_inner();
    let ctx = GroupContext::new(GroupParameters::from_decimal(&info.p, &info.q, &info.g)?);
    debug!(p_bits = ctx.p().bits(), "server group fetched");

    let message = prove(&ctx, secret_hex, identifier, &other_info.load()?)?;
    tracing::info!("Submitting proof for '{}' to {server}", message.identifier());

    let response = client
        .verify(tonic::Request::new(VerifyRequest {
            y: message.y().to_string(),
            a: message.a().to_string(),
            z: message.z().to_string(),
            identifier: message.identifier().to_string(),
        }))
        .await;

    match response {
        Ok(response) => {
            println!("Success: {}", response.into_inner().message);
            Ok(())
        }
        Err(status) => {
            eprintln!("Failed: {}", status.message());
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "grpc")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = GroupContext::new(Rfc5114Group::from_name(&cli.group)?.parameters());

    match cli.command {
        Commands::Prove {
            secret_hex,
            identifier,
            other_info,
        } => print_proof(&ctx, secret_hex.as_deref(), identifier, &other_info),
        Commands::Verify { proof, other_info } => verify_proof(&ctx, proof, &other_info),
        Commands::Submit {
            server,
            secret_hex,
            identifier,
            other_info,
        } => submit_proof(server, secret_hex.as_deref(), identifier, &other_info).await,
    }
}

#[cfg(not(feature = "grpc"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = GroupContext::new(Rfc5114Group::from_name(&cli.group)?.parameters());

    match cli.command {
        Commands::Prove {
            secret_hex,
            identifier,
            other_info,
        } => print_proof(&ctx, secret_hex.as_deref(), identifier, &other_info),
        Commands::Verify { proof, other_info } => verify_proof(&ctx, proof, &other_info),
    }
}
