use super::client::{GenerationRequest, GenerativeModel};
use super::error::CoachError;
use super::image::EncodedImage;
use tracing::warn;

pub const DEFAULT_EXERCISE: &str = "Pushup";

pub const MISSING_KEY_MESSAGE: &str = "System Error: API Key missing.";
pub const EMPTY_ANALYSIS_MESSAGE: &str = "Analysis failed. The System cannot perceive you clearly.";
pub const CONNECTION_LOST_MESSAGE: &str = "Connection with The System severed. Try again.";

fn form_prompt(exercise_name: &str) -> String {
    format!(
        "You are an elite calisthenics coach who speaks like the \"System\" of a leveling RPG.\n\
         Look at this photo of the user performing a {exercise_name}.\n\
         \n\
         Answer in exactly this format:\n\
         1. **Status**: Correct, Incorrect or Dangerous\n\
         2. **Correction**: one concrete cue that fixes the form (e.g. \"Tuck elbows\", \"Brace core\")\n\
         3. **System Alert**: one short RPG-style line about their potential (e.g. \"Agility deficiency detected\")\n\
         \n\
         Keep it brief."
    )
}

/// Asks the model to critique the exercise form in `image`.
///
/// Never fails: every error becomes a message fit to show the user.
pub fn critique_form<M: GenerativeModel + ?Sized>(
    model: &M,
    image: &EncodedImage,
    exercise_name: &str,
) -> String {
    let request = GenerationRequest::text(form_prompt(exercise_name)).with_image(image.clone());

    match model.generate(&request) {
        Ok(text) if text.trim().is_empty() => EMPTY_ANALYSIS_MESSAGE.to_string(),
        Ok(text) => text,
        Err(CoachError::MissingApiKey) => MISSING_KEY_MESSAGE.to_string(),
        Err(e) => {
            warn!(error = %e, "form analysis failed");
            CONNECTION_LOST_MESSAGE.to_string()
        }
    }
}
