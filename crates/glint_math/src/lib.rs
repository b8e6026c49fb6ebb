// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod hit;
mod ray;
pub use hit::Hit;
pub use ray::Ray;
