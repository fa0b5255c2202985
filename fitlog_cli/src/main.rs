use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use fitlog_core::calculator::{ActivityLevel, Sex, UnitSystem};
use fitlog_core::request::parse_day;
use fitlog_core::*;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Workout log with calorie estimates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log and report workouts for this user
    #[arg(long, global = true)]
    user: Option<String>,

    /// Body weight (kg) used for calorie estimates
    #[arg(long, global = true)]
    body_weight: Option<f64>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout from structured fields
    Add {
        #[arg(long)]
        category: Option<String>,

        /// Exercise name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        sets: Option<i64>,

        #[arg(long)]
        reps: Option<i64>,

        /// Weight in kg (0 for bodyweight)
        #[arg(long)]
        weight: Option<f64>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<f64>,

        /// MM/DD/YYYY, YYYY-MM-DD or RFC 3339 (defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Log a workout from free text, one field per line
    Log {
        #[arg(long)]
        category: String,

        /// Read the workout text from a file
        #[arg(long, conflicts_with = "lines")]
        file: Option<PathBuf>,

        /// Workout lines; stdin is read when neither lines nor --file are given
        lines: Vec<String>,

        /// Parse and estimate without logging
        #[arg(long)]
        dry_run: bool,
    },

    /// List a day's workouts (default)
    Today {
        /// Day to list (defaults to today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Today's totals and the last seven days of calories
    Dashboard {
        #[arg(long)]
        json: bool,
    },

    /// Estimate daily calorie needs
    Calc {
        /// Body weight (kg, or lb with --imperial)
        #[arg(long)]
        weight: f64,

        /// Height (cm, or in with --imperial)
        #[arg(long)]
        height: f64,

        #[arg(long)]
        age: f64,

        /// male or female
        #[arg(long)]
        sex: Sex,

        /// sedentary, light, moderate, active or very_active
        #[arg(long, default_value = "moderate")]
        activity: ActivityLevel,

        /// Weight in pounds and height in inches
        #[arg(long)]
        imperial: bool,

        #[arg(long)]
        json: bool,
    },

    /// Export the user's workouts to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

/// Settings shared by every command after config and flags are merged
struct Context {
    log_path: PathBuf,
    user: String,
    estimator: EstimatorConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    fitlog_core::logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = build_context(&cli, &config)?;
    tracing::debug!("Using workout log {:?} for {}", ctx.log_path, ctx.user);

    match cli.command {
        Some(Commands::Add {
            category,
            name,
            sets,
            reps,
            weight,
            duration,
            date,
        }) => {
            let request = CreateWorkoutRequest {
                category,
                workout_name: name,
                sets,
                reps,
                weight,
                duration,
                date,
            };
            cmd_add(&ctx, request)
        }
        Some(Commands::Log {
            category,
            file,
            lines,
            dry_run,
        }) => cmd_log(&ctx, &category, file.as_deref(), lines, dry_run),
        Some(Commands::Today { date, json }) => cmd_today(&ctx, date.as_deref(), json),
        Some(Commands::Dashboard { json }) => cmd_dashboard(&ctx, json),
        Some(Commands::Calc {
            weight,
            height,
            age,
            sex,
            activity,
            imperial,
            json,
        }) => {
            let profile = BodyProfile {
                weight,
                height,
                age,
                sex,
                activity,
                unit: if imperial {
                    UnitSystem::Imperial
                } else {
                    UnitSystem::Metric
                },
            };
            cmd_calc(&profile, json)
        }
        Some(Commands::Export { out }) => cmd_export(&ctx, &out),
        None => cmd_today(&ctx, None, false),
    }
}

fn build_context(cli: &Cli, config: &Config) -> Result<Context> {
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());

    let mut estimator = config.estimator.clone();
    if let Some(kg) = cli.body_weight {
        if !kg.is_finite() || kg <= 0.0 {
            return Err(Error::Config(format!(
                "--body-weight must be positive, got {}",
                kg
            )));
        }
        estimator.assumed_body_weight_kg = kg;
    }

    Ok(Context {
        log_path: data_dir.join(store::WORKOUT_LOG),
        user: cli.user.clone().unwrap_or_else(|| config.profile.user.clone()),
        estimator,
    })
}

fn cmd_add(ctx: &Context, request: CreateWorkoutRequest) -> Result<()> {
    let new = request.into_new_workout(Utc::now(), &Local)?;
    let workout = WorkoutRecord::create(&ctx.user, new, &ctx.estimator)?;
    save_workout(ctx, &workout)
}

fn cmd_log(
    ctx: &Context,
    category: &str,
    file: Option<&Path>,
    lines: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None if !lines.is_empty() => lines.join("\n"),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let new = parse_workout_text(&text, category, Utc::now())?;
    let workout = WorkoutRecord::create(&ctx.user, new, &ctx.estimator)?;

    if dry_run {
        display_workout(&workout);
        println!("\n[Dry run - not logging workout]");
        return Ok(());
    }

    save_workout(ctx, &workout)
}

fn save_workout(ctx: &Context, workout: &WorkoutRecord) -> Result<()> {
    let mut store = JsonlStore::new(&ctx.log_path);
    store.append(workout)?;

    display_workout(workout);
    println!("\n✓ Workout logged!");
    Ok(())
}

fn cmd_today(ctx: &Context, date: Option<&str>, json: bool) -> Result<()> {
    let day = match date {
        Some(raw) => parse_day(raw, &Local)?,
        None => Local::now().date_naive(),
    };
    let (start, _) = aggregate::day_bounds(day, &Local);

    let history = load_user_workouts(&ctx.log_path, &ctx.user, Some(start))?;
    let daily = workouts_on_day(&history, &ctx.user, day, &Local);

    if json {
        println!("{}", serde_json::to_string_pretty(&daily)?);
        return Ok(());
    }

    println!("Workouts on {}", day.format("%Y-%m-%d"));
    if daily.todays_workouts.is_empty() {
        println!("  (none)");
    }
    for workout in &daily.todays_workouts {
        println!(
            "  {:<24} {:<10} {}x{} @ {} kg, {} min  {:>8.2} kcal",
            workout.workout_name,
            workout.category,
            workout.sets,
            workout.reps,
            workout.weight,
            workout.duration,
            workout.calories_burned
        );
    }
    println!("Total: {:.2} kcal", daily.total_calories_burnt);
    Ok(())
}

fn cmd_dashboard(ctx: &Context, json: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let first_day = today
        .checked_sub_days(chrono::Days::new(aggregate::WINDOW_DAYS - 1))
        .unwrap_or(today);
    let since = aggregate::start_of_day(first_day, &Local);

    let history = load_user_workouts(&ctx.log_path, &ctx.user, Some(since))?;
    let dash = dashboard(&history, &ctx.user, today, &Local);

    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    let summary = &dash.summary;
    println!("Today");
    println!("  Calories burnt:  {:.2} kcal", summary.total_calories_burnt);
    println!("  Workouts:        {}", summary.total_workouts);
    println!(
        "  Avg per workout: {:.2} kcal",
        summary.avg_calories_burnt_per_workout
    );
    for slice in &summary.pie_chart_data {
        println!("    {:<12} {:>8.2} kcal", slice.category, slice.total);
    }

    println!();
    println!("Last 7 days");
    let series = &dash.total_weeks_calories_burnt;
    for (label, calories) in series.weeks.iter().zip(&series.calories_burned) {
        println!("  {:>5}  {:>8.2} kcal", label, calories);
    }
    Ok(())
}

fn cmd_calc(profile: &BodyProfile, json: bool) -> Result<()> {
    let targets = calorie_targets(profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    println!("BMR:          {} kcal/day", targets.bmr);
    println!("Maintenance:  {} kcal/day", targets.maintenance);
    println!("Weight loss");
    println!("  mild:       {}", targets.weight_loss.mild);
    println!("  moderate:   {}", targets.weight_loss.moderate);
    println!("  aggressive: {}", targets.weight_loss.aggressive);
    println!("Weight gain");
    println!("  mild:       {}", targets.weight_gain.mild);
    println!("  moderate:   {}", targets.weight_gain.moderate);
    Ok(())
}

fn cmd_export(ctx: &Context, out: &Path) -> Result<()> {
    let history = load_user_workouts(&ctx.log_path, &ctx.user, None)?;
    let count = export_csv(&history, out)?;

    println!("✓ Exported {} workouts to CSV", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn display_workout(workout: &WorkoutRecord) {
    println!("\n  {} ({})", workout.workout_name, workout.category);
    println!(
        "  {} sets x {} reps @ {} kg, {} min",
        workout.sets, workout.reps, workout.weight, workout.duration
    );
    println!("  Calories burned: {:.2} kcal", workout.calories_burned);
}
