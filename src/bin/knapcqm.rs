// Freight loading as a 0/1 knapsack: pick the items of highest total value
// whose total weight fits the container.

use clap::Parser;
use knapcqm::application::grpc_service::run_with_time_limit;
use knapcqm::{
    GeneratorConfig, HybridSamplerClient, InstanceGenerator, SamplerBackend, SamplerConfig,
    SamplerFactory,
};
use log::{debug, info, LevelFilter};

/// Build a knapsack CQM from a random instance and print its feasible samples
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, default_value_t = 12)]
    num_items: usize,
    /// Seed for a reproducible instance
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long, default_value = "CQMKnapsack")]
    label: String,
    /// Time budget in seconds
    #[arg(short, long, default_value_t = 6.0)]
    time_limit: f64,
    /// Hybrid sampler endpoint, e.g. http://127.0.0.1:50051; samples locally when absent
    #[arg(short, long)]
    endpoint: Option<String>,
    /// Upload the model as a stream of chunks
    #[arg(long, requires = "endpoint")]
    stream: bool,
    #[arg(short, long, default_value = "auto")]
    backend: SamplerBackend,
    /// Maximum number of feasible samples to print
    #[arg(long, default_value_t = 20)]
    show: usize,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "warn"
    )]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level)
        .init();

    let mut generator_config = GeneratorConfig::default().with_num_items(cli.num_items);
    if let Some(seed) = cli.seed {
        generator_config = generator_config.with_seed(seed);
    }
    let instance = InstanceGenerator::new(generator_config)?.generate();
    println!("{}", instance);

    println!("\nBuilding a CQM for {} items.", instance.num_items());
    let cqm = instance.build_model()?;
    debug!("Model:\n{}", cqm);

    let config = SamplerConfig::new(cli.label)
        .with_time_limit(cli.time_limit)
        .with_backend(cli.backend);

    let sampleset = match &cli.endpoint {
        Some(endpoint) => {
            let mut client = HybridSamplerClient::connect(endpoint.clone()).await?;
            if cli.stream {
                client.sample_cqm_streamed(&cqm, &config).await?
            } else {
                client.sample_cqm(&cqm, &config).await?
            }
        }
        None => {
            let sampler = SamplerFactory::create_sampler(&config)?;
            info!("Sampling locally with {}", sampler.name());
            run_with_time_limit(sampler, cqm, config).await?
        }
    };

    let feasible = sampleset.feasible();
    info!(
        "{} of {} samples are feasible",
        feasible.len(),
        sampleset.len()
    );
    println!("{}", feasible.clone().truncate(cli.show));

    match feasible.first() {
        Some(best) => println!("\nBest selection: {}", instance.selection(best)),
        None => println!("\nNo feasible selection found."),
    }

    Ok(())
}
