// Data access: the analysis-ready bundle, the backend session, and the
// synthetic demo bundle generator.
pub mod bundle;
pub mod demo;
pub mod session;

pub use bundle::{DataBundle, PrecipObservation, SceneObservation};
pub use session::EarthSession;
