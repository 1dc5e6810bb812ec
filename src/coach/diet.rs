//! Diet plan generation.

use super::client::{GenerationRequest, GenerativeModel};
use super::error::CoachError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub calories: f64,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub total_calories: f64,
    pub macros: Macros,
    pub meals: Vec<Meal>,
}

/// What the user asks for; rendered into the free-form preference text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DietPreferences {
    pub calories: u32,
    pub diet_type: String,
    pub goal: String,
    pub notes: String,
}

impl Default for DietPreferences {
    fn default() -> Self {
        Self {
            calories: 2000,
            diet_type: "Vegetarian".to_string(),
            goal: "Muscle Gain".to_string(),
            notes: String::new(),
        }
    }
}

impl fmt::Display for DietPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Target Calories: {}. Diet Type: {}. Goal: {}. Additional Notes: {}",
            self.calories, self.diet_type, self.goal, self.notes
        )
    }
}

/// Response schema in the Gemini schema dialect.
pub fn diet_plan_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalCalories": { "type": "NUMBER" },
            "macros": {
                "type": "OBJECT",
                "properties": {
                    "protein": { "type": "NUMBER" },
                    "carbs": { "type": "NUMBER" },
                    "fats": { "type": "NUMBER" }
                },
                "required": ["protein", "carbs", "fats"]
            },
            "meals": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "calories": { "type": "NUMBER" },
                        "ingredients": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["name", "description", "calories", "ingredients"]
                }
            }
        },
        "required": ["totalCalories", "macros", "meals"]
    })
}

fn diet_prompt(preferences: &str) -> String {
    format!(
        "Create a one-day diet plan for a user with these goals and preferences: \"{preferences}\".\n\
         \n\
         The plan is for an Indian middle-class household, so it must be budget-friendly and culturally familiar.\n\
         \n\
         1. Ingredients: prefer affordable local staples.\n\
            - Carbohydrates: roti (wheat), rice, oats, poha, suji.\n\
            - Proteins: dal, chana, rajma, soya chunks, paneer, milk, curd, eggs.\n\
            - Fats: mustard oil, ghee, peanuts.\n\
            - Vegetables: seasonal sabzi such as bhindi, gobi, aloo, palak, lauki.\n\
         2. Cost: leave out expensive imports such as avocado, berries, quinoa, salmon.\n\
         3. Format: each meal name is a simple Indian dish (e.g. \"Dal Chawal\", \"Paneer Bhurji\"), \
         and each description carries a short cooking or budget tip (e.g. \"Soak dal for 2 hours\").\n\
         \n\
         Reply with a single JSON object that matches the requested schema."
    )
}

/// Generates a structured diet plan. Empty or malformed model output is an
/// error for the caller to report.
pub fn generate_diet_plan<M: GenerativeModel + ?Sized>(
    model: &M,
    preferences: &str,
) -> Result<DietPlan, CoachError> {
    let request =
        GenerationRequest::text(diet_prompt(preferences)).with_json_schema(diet_plan_schema());

    let text = model.generate(&request).map_err(|e| {
        warn!(error = %e, "diet generation failed");
        e
    })?;
    let plan = parse_diet_plan(&text)?;

    info!(
        meals = plan.meals.len(),
        total_calories = plan.total_calories,
        "diet plan generated"
    );
    Ok(plan)
}

/// Parses model output into a plan, rejecting empty text and plans with no
/// meals.
pub fn parse_diet_plan(text: &str) -> Result<DietPlan, CoachError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoachError::EmptyResponse);
    }

    let plan: DietPlan =
        serde_json::from_str(text).map_err(|e| CoachError::MalformedPlan {
            message: e.to_string(),
        })?;

    if plan.meals.is_empty() {
        return Err(CoachError::MalformedPlan {
            message: "plan contains no meals".to_string(),
        });
    }
    Ok(plan)
}
