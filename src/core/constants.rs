// XP and leveling
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_MAX_XP: u64 = 100;
/// maxXp grows by half of itself (floored) on every level-up.
pub const MAX_XP_GROWTH_DIVISOR: u64 = 2;

// Rank thresholds: a rank applies when level is strictly above its bound
pub const RANK_S_ABOVE_LEVEL: u32 = 50;
pub const RANK_A_ABOVE_LEVEL: u32 = 40;
pub const RANK_B_ABOVE_LEVEL: u32 = 30;
pub const RANK_C_ABOVE_LEVEL: u32 = 20;
pub const RANK_D_ABOVE_LEVEL: u32 = 10;

// Character stats
pub const BASE_STAT_VALUE: u32 = 10;
pub const NUM_STATS: usize = 5;
pub const QUEST_STAT_REWARD: u32 = 1;

// Identity
pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const FALLBACK_LOGIN_NAME: &str = "Shadow Monarch";
pub const STARTING_STREAK: u32 = 1;

// Training sessions
pub const TRAINING_SESSION_XP: u64 = 50;

// Check-in step as a fraction of the quest target
pub const DAILY_CHECK_IN_DIVISOR: f64 = 5.0;
pub const LIFESTYLE_CHECK_IN_DIVISOR: f64 = 4.0;

// Generative model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_TIMEOUT_SECONDS: u64 = 60;
