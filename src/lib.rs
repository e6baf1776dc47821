pub mod configuration;

pub mod math {
    pub mod round;

    pub mod integration {
        pub mod quadraturerule;
        pub mod integrationresult;
        pub mod evaluationcontext;
        pub mod adaptiveintegrator;
        pub mod comparison;
    }
}

pub use configuration::{
    ConfigurationError,
    IntegrationSettings
};
pub use math::integration::adaptiveintegrator::{
    AdaptiveIntegrator,
    integrate,
    integrate_cached,
    try_integrate,
    try_integrate_cached
};
pub use math::integration::comparison::VariantComparison;
pub use math::integration::integrationresult::IntegrationResult;
pub use math::integration::quadraturerule::{
    simpson,
    trapezoid
};
