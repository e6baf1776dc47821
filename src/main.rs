use std::process::ExitCode;

use clap::{
    Parser,
    ValueEnum
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use adaptquad::configuration::IntegrationSettings;
use adaptquad::math::integration::adaptiveintegrator::AdaptiveIntegrator;
use adaptquad::math::integration::comparison::VariantComparison;


#[derive(Clone, Copy, Debug, ValueEnum)]
enum Integrand {
    /// x^2 + 1
    SquarePlusOne,
    /// x^3
    Cubic,
    /// sin(x)
    Sine,
    /// e^x
    Exponential,
    /// sqrt(x)
    Sqrt
}

impl Integrand {
    fn value(&self, x: f64) -> f64 {
        match self {
            Integrand::SquarePlusOne => x * x + 1.0,
            Integrand::Cubic => x * x * x,
            Integrand::Sine => x.sin(),
            Integrand::Exponential => x.exp(),
            Integrand::Sqrt => x.sqrt()
        }
    }

    fn antiderivative(&self, x: f64) -> Option<f64> {
        match self {
            Integrand::SquarePlusOne => Some(x * x * x / 3.0 + x),
            Integrand::Cubic => Some(x.powi(4) / 4.0),
            Integrand::Sine => Some(-x.cos()),
            Integrand::Exponential => Some(x.exp()),
            Integrand::Sqrt if x >= 0.0 => Some(2.0 / 3.0 * x.powf(1.5)),
            Integrand::Sqrt => None
        }
    }

    fn exact(&self, c: f64, d: f64) -> Option<f64> {
        Some(self.antiderivative(d)? - self.antiderivative(c)?)
    }
}

/// 以自適應梯形／Simpson 二分法積分，並比較有無快取的求值次數
#[derive(Parser)]
#[command(name = "adaptquad")]
#[command(version)]
struct Cli {
    /// 被積函數
    #[arg(long, value_enum, default_value = "square-plus-one")]
    integrand: Integrand,

    /// 積分下限
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lower: f64,

    /// 積分上限
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    upper: f64,

    /// 整個區間的容許誤差
    #[arg(long, default_value_t = 1e-4)]
    epsilon: f64,

    /// JSON 設定檔（max_level, min_width, cache_digits）
    #[arg(short, long)]
    config: Option<String>,

    /// RUST_LOG 未設定時使用的 log level
    #[arg(long, default_value = "warn")]
    log_level: String
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let settings = match cli.config.as_deref() {
        Some(path) => match IntegrationSettings::from_reader(path) {
            Ok(settings) => settings,
            Err(error) => {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        },
        None => IntegrationSettings::default()
    };
    info!(?settings, integrand = ?cli.integrand, "integrating");

    let integrator = AdaptiveIntegrator::new(settings);
    let integrand = cli.integrand;
    let comparison = VariantComparison::run(
        &integrator,
        |x| integrand.value(x),
        cli.lower,
        cli.upper,
        cli.epsilon
    );

    println!("plain:");
    println!("  result:      {:.8}", comparison.plain().value());
    println!("  evaluations: {}", comparison.plain().evaluations());
    println!("cached:");
    println!("  result:      {:.8}", comparison.cached().value());
    println!("  evaluations: {}", comparison.cached().evaluations());

    if let Some(exact) = integrand.exact(cli.lower, cli.upper) {
        let (plain_error, cached_error) = comparison.absolute_errors(exact);
        println!("exact:         {:.8}", exact);
        println!("plain error:   {:.8}", plain_error);
        println!("cached error:  {:.8}", cached_error);
    }

    if let Some((saved, percent)) = comparison.evaluation_reduction() {
        println!("evaluations saved: {} ({:.1}%)", saved, percent);
    }

    ExitCode::SUCCESS
}
