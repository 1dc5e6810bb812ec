//! AI coach: exercise form critique and diet plan generation, both backed
//! by an external generative model.
//!
//! Neither feature touches progression state.

pub mod client;
pub mod diet;
pub mod error;
pub mod form;
pub mod image;

pub use client::{GeminiClient, GenerationRequest, GenerativeModel};
pub use diet::{generate_diet_plan, DietPlan, DietPreferences, Macros, Meal};
pub use error::CoachError;
pub use form::critique_form;
pub use image::EncodedImage;
