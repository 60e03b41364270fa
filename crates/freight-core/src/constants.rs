//! Constantes del motor de pasos.

/// Versión lógica del motor. Forma parte del fingerprint de cada envío, de
/// modo que un cambio de versión produce fingerprints distintos aunque el
/// valor agregado sea idéntico.
pub const ENGINE_VERSION: &str = "S1.0";
