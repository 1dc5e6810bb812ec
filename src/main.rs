//! Shadow System command-line front end.
//!
//! Usage:
//!   shadow-system <command> [args]
//!
//! Commands:
//!   status                         Player card: level, XP, rank, stats
//!   quests                         Daily quests and habits with progress
//!   login [name]                   Unlock the session (name is kept on first login only)
//!   logout                         Lock the session; progress is kept
//!   log <quest-id> [amount]        Log progress (default: one check-in step)
//!   complete <quest-id>            Mark a quest complete
//!   train                          Record a finished training session
//!   critique <image> [exercise]    AI form check of an exercise photo
//!   diet [--calories N] [--type T] [--goal G] [--notes TEXT]
//!                                  Generate a one-day diet plan
//!   wipe                           Erase all saved progress

use shadow_system::coach::form::DEFAULT_EXERCISE;
use shadow_system::coach::{
    critique_form, generate_diet_plan, DietPlan, DietPreferences, EncodedImage, GeminiClient,
};
use shadow_system::core::constants::TRAINING_SESSION_XP;
use shadow_system::utils::{init_logging, JsonFileStore};
use shadow_system::{AppConfig, ProgressionEngine, Quest, QuestCompletion, StatType};
use std::env;
use std::process::ExitCode;

type Engine = ProgressionEngine<JsonFileStore>;

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = AppConfig::from_env();

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String], config: &AppConfig) -> Result<(), String> {
    let command = args.first().map(String::as_str).unwrap_or("status");
    let rest = args.get(1..).unwrap_or(&[]);

    match command {
        "status" => {
            let engine = open_engine(config)?;
            print_status(&engine);
            Ok(())
        }
        "quests" => {
            let engine = open_engine(config)?;
            print_quests(&engine);
            Ok(())
        }
        "login" => {
            let mut engine = open_engine(config)?;
            let input = rest.join(" ");
            let name = engine.resolve_login_name(&input);
            engine.login(&name);
            println!("[SYSTEM] Welcome, {}.", engine.user().name);
            Ok(())
        }
        "logout" => {
            let mut engine = open_engine(config)?;
            engine.logout();
            println!("[SYSTEM] Session locked.");
            Ok(())
        }
        "log" => {
            let mut engine = open_session(config)?;
            let quest_id = rest.first().ok_or("usage: log <quest-id> [amount]")?;
            let quest = engine
                .quest(quest_id)
                .ok_or_else(|| format!("unknown quest '{}'", quest_id))?;
            if quest.completed {
                println!("[SYSTEM] '{}' is already complete.", quest.title);
                return Ok(());
            }
            let amount = match rest.get(1) {
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| format!("invalid amount '{}'", raw))?,
                None => quest.check_in_amount(),
            };

            let completion = engine.toggle_quest_progress(quest_id, amount);
            if let Some(quest) = engine.quest(quest_id) {
                println!(
                    "[SYSTEM] {}: {} / {} {}",
                    quest.title, quest.current, quest.target, quest.unit
                );
            }
            if let Some(completion) = completion {
                print_completion(&engine, &completion);
            }
            Ok(())
        }
        "complete" => {
            let mut engine = open_session(config)?;
            let quest_id = rest.first().ok_or("usage: complete <quest-id>")?;
            match engine.complete_quest(quest_id) {
                Some(completion) => print_completion(&engine, &completion),
                None => println!("[SYSTEM] Nothing to complete for '{}'.", quest_id),
            }
            Ok(())
        }
        "train" => {
            let mut engine = open_session(config)?;
            let levelups = engine.complete_training_session();
            println!("{}", training_cleared_line());
            print_levelups(&engine, levelups);
            Ok(())
        }
        "critique" => {
            let path = rest.first().ok_or("usage: critique <image> [exercise]")?;
            let exercise = rest.get(1).map(String::as_str).unwrap_or(DEFAULT_EXERCISE);
            let image = EncodedImage::from_path(path)
                .map_err(|e| format!("could not read image '{}': {}", path, e))?;
            let client = GeminiClient::new(config.coach.clone());
            println!("{}", critique_form(&client, &image, exercise));
            Ok(())
        }
        "diet" => {
            let preferences = parse_diet_args(rest)?;
            let client = GeminiClient::new(config.coach.clone());
            let plan = generate_diet_plan(&client, &preferences.to_string())
                .map_err(|e| format!("System failed to generate supplies: {}", e))?;
            print_diet_plan(&plan);
            Ok(())
        }
        "wipe" => {
            let mut engine = open_engine(config)?;
            engine.wipe();
            println!("[SYSTEM] All records erased.");
            Ok(())
        }
        other => Err(format!("unknown command '{}'", other)),
    }
}

fn open_engine(config: &AppConfig) -> Result<Engine, String> {
    let store = match &config.data_dir {
        Some(dir) => JsonFileStore::open(dir),
        None => JsonFileStore::open_default(),
    }
    .map_err(|e| format!("could not open data directory: {}", e))?;
    Ok(ProgressionEngine::load(store))
}

fn open_session(config: &AppConfig) -> Result<Engine, String> {
    let engine = open_engine(config)?;
    if !engine.is_authenticated() {
        return Err("session locked; run `shadow-system login` first".to_string());
    }
    Ok(engine)
}

fn parse_diet_args(args: &[String]) -> Result<DietPreferences, String> {
    let mut preferences = DietPreferences::default();
    let mut i = 0;
    while i < args.len() {
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("missing value for {}", args[i]))?;
        match args[i].as_str() {
            "--calories" => {
                preferences.calories = value
                    .parse()
                    .map_err(|_| format!("invalid calories '{}'", value))?;
            }
            "--type" => preferences.diet_type = value.clone(),
            "--goal" => preferences.goal = value.clone(),
            "--notes" => preferences.notes = value.clone(),
            other => return Err(format!("unknown diet option '{}'", other)),
        }
        i += 2;
    }
    Ok(preferences)
}

fn xp_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn training_cleared_line() -> String {
    format!(
        "[SYSTEM] DUNGEON CLEARED: +{} XP, +1 {}",
        TRAINING_SESSION_XP,
        StatType::Strength.abbrev()
    )
}

fn print_status(engine: &Engine) {
    let user = engine.user();
    if !engine.is_authenticated() {
        println!("[SYSTEM] Session locked.");
    }
    println!("{}  Lv.{}  {}", user.name, user.level, user.rank);
    println!(
        "XP {} {} / {}",
        xp_bar(engine.xp_progress_percent(), 20),
        user.xp,
        user.max_xp
    );
    for stat in StatType::all() {
        println!("  {:<12} {}", stat.name(), user.stats.get(stat));
    }
    println!("  {:<12} {}", "Total", user.stats.total());
    println!("Quests cleared: {}", user.completed_quests.len());
}

fn print_quest_line(quest: &Quest) {
    let mark = if quest.completed { "x" } else { " " };
    let reward = match quest.stat_reward {
        Some(stat) => format!("+{} XP +1 {}", quest.xp_reward, stat.abbrev()),
        None => format!("+{} XP", quest.xp_reward),
    };
    println!(
        "  [{}] {:<18} {:<12} {} / {} {} {:>4.0}%  ({})",
        mark,
        quest.id,
        quest.title,
        quest.current,
        quest.target,
        quest.unit,
        quest.progress_percent(),
        reward
    );
}

fn print_quests(engine: &Engine) {
    println!("DAILY QUESTS");
    engine.daily_quests().for_each(print_quest_line);
    println!("HABITS");
    engine.lifestyle_quests().for_each(print_quest_line);
}

fn print_completion(engine: &Engine, completion: &QuestCompletion) {
    match completion.stat_raised {
        Some(stat) => println!(
            "[SYSTEM] Quest complete: +{} XP, +1 {}",
            completion.xp_granted,
            stat.abbrev()
        ),
        None => println!("[SYSTEM] Quest complete: +{} XP", completion.xp_granted),
    }
    print_levelups(engine, completion.levels_gained);
}

fn print_levelups(engine: &Engine, levelups: u32) {
    if levelups > 0 {
        let user = engine.user();
        println!("[SYSTEM] LEVEL UP! Lv.{} ({})", user.level, user.rank);
    }
}

fn print_diet_plan(plan: &DietPlan) {
    println!(
        "Total: {} kcal  (protein {}g, carbs {}g, fats {}g)",
        plan.total_calories, plan.macros.protein, plan.macros.carbs, plan.macros.fats
    );
    for meal in &plan.meals {
        println!();
        println!("{} - {} kcal", meal.name, meal.calories);
        println!("  {}", meal.description);
        for ingredient in &meal.ingredients {
            println!("  - {}", ingredient);
        }
    }
}
