use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use log::info;
use teller::{
    export, ArtifactManager, BuiltinArtifact, FieldKind, InputRecord, Outcome, Predictor, SCHEMA,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Force a fresh download of the artifact files
    #[arg(short, long)]
    fresh: bool,

    /// Directory holding the artifact cache (defaults to the platform cache dir)
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

    /// Explicit model artifact path, bypassing the artifact cache
    #[arg(long, requires = "encoders")]
    model: Option<PathBuf>,

    /// Explicit encoder artifact path, bypassing the artifact cache
    #[arg(long, requires = "model")]
    encoders: Option<PathBuf>,

    /// Where to write the downloaded prediction result
    #[arg(long, default_value = "prediction_result.csv")]
    output: PathBuf,
}

async fn ensure_artifacts_downloaded(manager: &ArtifactManager, fresh: bool) -> Result<()> {
    let artifact = BuiltinArtifact::BankMarketing;

    if fresh {
        info!("Fresh download requested - removing any existing artifact files...");
        manager.remove_download(artifact)?;
    }

    if !manager.is_downloaded(artifact) {
        info!("Downloading artifacts...");
        manager.download_artifact(artifact).await?;
    }

    Ok(())
}

async fn build_predictor(args: &Args) -> Result<Predictor> {
    if let (Some(model), Some(encoders)) = (&args.model, &args.encoders) {
        let predictor = Predictor::builder()
            .with_artifact_files(&model.to_string_lossy(), &encoders.to_string_lossy())?
            .build()?;
        return Ok(predictor);
    }

    let manager = match &args.artifacts_dir {
        Some(dir) => ArtifactManager::new(dir)?,
        None => ArtifactManager::new_default()?,
    };
    ensure_artifacts_downloaded(&manager, args.fresh).await?;

    let artifact = BuiltinArtifact::BankMarketing;
    let model = manager.load_model(artifact)?;
    let encoders = manager.load_encoders(artifact)?;
    Ok(Predictor::builder().with_artifacts(model, encoders)?.build()?)
}

fn collect_record(predictor: &Predictor) -> Result<InputRecord> {
    let mut builder = InputRecord::builder();

    for spec in SCHEMA.iter() {
        match spec.kind {
            FieldKind::BoundedInt { min, max, default } => {
                let value: i64 = Input::new()
                    .with_prompt(format!("{} [{}..{}]", spec.label, min, max))
                    .default(default as i64)
                    .validate_with(move |input: &i64| -> Result<(), String> {
                        if *input >= min as i64 && *input <= max as i64 {
                            Ok(())
                        } else {
                            Err(format!("must be between {} and {}", min, max))
                        }
                    })
                    .interact_text()?;
                builder = builder.set_number(spec.name, value as f32)?;
            }
            FieldKind::Unbounded { default } => {
                let value: f64 = Input::new()
                    .with_prompt(spec.label)
                    .default(default as f64)
                    .interact_text()?;
                builder = builder.set_number(spec.name, value as f32)?;
            }
            FieldKind::Categorical => {
                let vocabulary = predictor.registry().vocabulary(spec.name)?;
                let index = Select::new()
                    .with_prompt(spec.label)
                    .items(vocabulary)
                    .default(0)
                    .interact()?;
                builder = builder.set_label(spec.name, vocabulary[index].clone())?;
            }
        }
    }

    Ok(builder.build())
}

fn run_request(predictor: &Predictor, output: &Path) -> Result<()> {
    let record = collect_record(predictor)?;

    if Confirm::new()
        .with_prompt("Show customer details?")
        .default(false)
        .interact()?
    {
        println!("\nCustomer Input Summary");
        for (spec, value) in record.fields() {
            println!("  {:<36} {}", spec.label, value);
        }
        println!();
    }

    if Confirm::new()
        .with_prompt("Show encoded input?")
        .default(false)
        .interact()?
    {
        let encoded = predictor.encode(&record)?;
        println!("\nEncoded Input Data");
        for (name, value) in encoded.columns() {
            println!("  {:<12} {}", name, value);
        }
        println!();
    }

    let result = predictor.predict(&record)?;
    match result.outcome {
        Outcome::Yes => println!(
            "\nCustomer will likely SUBSCRIBE (Confidence: {})\n",
            result.confidence_percent()
        ),
        Outcome::No => println!(
            "\nCustomer will likely NOT subscribe (Confidence: {})\n",
            result.confidence_percent()
        ),
    }

    if Confirm::new()
        .with_prompt("Show feature importances?")
        .default(false)
        .interact()?
    {
        let mut importances = predictor.feature_importances();
        importances.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        println!("\nFeature Importance");
        for (column, score) in importances {
            println!("  {:<12} {:.4}", column, score);
        }
        println!();
    }

    if Confirm::new()
        .with_prompt("Download prediction result as CSV?")
        .default(true)
        .interact()?
    {
        let bytes = export(&record, &result);
        fs::write(output, bytes)?;
        println!("Saved to {}\n", output.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Bank Term Deposit Prediction ===");
    let predictor = build_predictor(&args).await?;
    let info = predictor.info();
    info!(
        "Predictor ready: {} expected columns, {} trees",
        info.expected_columns.len(),
        info.tree_count
    );

    println!("Bank Marketing Term Deposit Prediction");
    println!("Enter customer details to predict if they will subscribe to a term deposit.\n");

    loop {
        // A failed request leaves the loaded artifacts untouched; only
        // the current prediction is abandoned.
        if let Err(e) = run_request(&predictor, &args.output) {
            eprintln!("\n{}\n", e);
        }

        if !Confirm::new()
            .with_prompt("Predict another customer?")
            .default(false)
            .interact()?
        {
            break;
        }
        println!();
    }

    Ok(())
}
