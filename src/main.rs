//! Customer Churn Prediction CLI
//!
//! Train the churn pipeline on historical data and serve one-off
//! predictions from the persisted artifact.

use clap::{Parser, Subcommand};
use churn::{Config, Result};

#[derive(Parser)]
#[command(name = "churn")]
#[command(about = "Customer churn prediction using logistic regression", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the pipeline and persist the artifact
    Train {
        /// Override the iteration budget
        #[arg(long)]
        epochs: Option<usize>,
        /// Override the learning rate
        #[arg(long)]
        lr: Option<f64>,
    },
    /// Predict churn for a single customer record
    Predict {
        /// JSON file with the customer record (stdin if omitted)
        #[arg(long)]
        input: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show artifact information
    Info,
    /// Re-evaluate the persisted artifact on the held-out partition
    Validate,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Train { epochs, lr } => commands::train(config, epochs, lr),
        Commands::Predict { input, format } => commands::predict(&config, input, format),
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
            ModelCommands::Validate => commands::model_validate(&config),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use churn::data::loader;
    use churn::model::ChurnPipeline;
    use churn::predict::{service, ChurnPredictor};
    use churn::training;
    use churn::{ChurnError, CustomerRecord};

    type TrainBackend = Autodiff<NdArray<f32>>;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        std::fs::create_dir_all("model")?;
        println!("Created data/ and model/ directories");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Place the labeled dataset at the configured dataset path");
        println!("  3. Run 'churn train' to fit and persist the pipeline");
        println!("  4. Run 'churn predict --input customer.json' to score a record");

        Ok(())
    }

    pub fn train(mut config: Config, epochs: Option<usize>, lr: Option<f64>) -> Result<()> {
        if let Some(epochs) = epochs {
            config.training.max_epochs = epochs;
        }
        if let Some(lr) = lr {
            config.training.learning_rate = lr;
        }

        println!("Training on {}...", config.data.dataset_path);
        let device = Default::default();
        let (_, report) = training::train_and_evaluate::<TrainBackend>(&config, device)?;

        println!("\n{}", report);
        println!("Saved pipeline artifact to {}", config.data.artifact_path);
        Ok(())
    }

    pub fn predict(config: &Config, input: Option<String>, format: OutputFormat) -> Result<()> {
        let record = read_record(input)?;
        let predictor = ChurnPredictor::new(&config.data.artifact_path);
        let prediction = predictor.predict(&record)?;

        match format {
            OutputFormat::Table => {
                println!("{}", service::format_prediction(&record, &prediction))
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&prediction).unwrap());
            }
        }
        Ok(())
    }

    fn read_record(input: Option<String>) -> Result<CustomerRecord> {
        let text = match input {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                use std::io::Read;
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        serde_json::from_str(&text).map_err(|e| ChurnError::SchemaMismatch(e.to_string()))
    }

    pub fn model_info(config: &Config) -> Result<()> {
        let pipeline = ChurnPipeline::load(&config.data.artifact_path)?;
        let transformer = pipeline.transformer();

        println!("Model Information");
        println!("───────────────────────────────");
        println!("  Artifact:     {}", config.data.artifact_path);
        println!("  Features:     {}", transformer.output_dim());
        println!("  Intercept:    {:.6}", pipeline.classifier().intercept());
        println!("  Columns:");
        for name in transformer.column_names() {
            println!("    {}", name);
        }
        Ok(())
    }

    pub fn model_validate(config: &Config) -> Result<()> {
        let pipeline = ChurnPipeline::load(&config.data.artifact_path)?;
        let summary = loader::read_dataset(&config.data.dataset_path)?;

        // Reproduce the training-time partition so only held-out rows are scored
        let (_, test) = summary
            .dataset
            .stratified_split(config.training.train_ratio, config.training.seed);
        let metrics = training::evaluate(&pipeline, &test);

        println!("Validation on {} held-out rows", test.len());
        println!("{}", metrics);
        Ok(())
    }
}
