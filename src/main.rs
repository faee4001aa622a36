pub mod parser;

use anyhow::Error;
use clap::{App, Arg};
use config::Config;
use controller::{Controller, Entity, Item, Level, SearchBy, ToTable, User};
use engine::profile::SortKey;
use engine::Engine;
use movie_night::models;
use movie_night::MovieNightController;
use parser::Statement;
use simplelog::{LevelFilter, TermLogger, TerminalMode};
use std::collections::{HashMap, HashSet};

macro_rules! prompt {
    ($ed:ident) => {{
        use rustyline::error::ReadlineError;

        match $ed.readline(PROMPT) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

fn print_help() {
    println!("Main help:");
    println!("h | help                               Shows this help");
    println!("q | quit                               Quit");
    println!("v | version                            Show version");
    println!("query_user(<search>)                   Show matching users");
    println!("query_item(<search>)                   Show matching items");
    println!("query_ratings(<search>)                Show the ratings of a user");
    println!("rate(<user>, <item>, <level>)          Save a rating (upserts)");
    println!("ranking(<category>)                    Overall category ranking");
    println!("decades(<category>)                    Ranking grouped by decade");
    println!("divisive(<category>)                   Most polarizing items first");
    println!("eclectic(<category>)                   Who disagrees with the consensus");
    println!("compare(<user>, <user>)                Taste comparison for a pair");
    println!("compare3(<user>, <user>, <user>)       Taste comparison for a triple");
    println!("next(<user>, <category>)               What to rate next");
    println!("profile(<user>, <sort>)                A user's rated items");
    println!();
    println!("<search> is id(...), name(...) or slug(...); levels are");
    println!("loved/liked/okay/disliked/hated/not_rated; sorts are");
    println!("title/year/director/genre/rating/popularity");
}

fn first_user(controller: &MovieNightController, by: &SearchBy) -> Result<models::User, Error> {
    Ok(controller.users_by(by)?.swap_remove(0))
}

fn first_item(controller: &MovieNightController, by: &SearchBy) -> Result<models::Movie, Error> {
    Ok(controller.items_by(by)?.swap_remove(0))
}

fn first_category(
    controller: &MovieNightController,
    by: &SearchBy,
) -> Result<models::Category, Error> {
    Ok(controller.categories_by(by)?.swap_remove(0))
}

fn item_titles(controller: &MovieNightController) -> Result<HashMap<i32, String>, Error> {
    Ok(controller
        .items()?
        .into_iter()
        .map(|movie| (movie.id, movie.title))
        .collect())
}

fn titled(set: &HashSet<i32>, titles: &HashMap<i32, String>) -> String {
    let mut titles: Vec<String> = set
        .iter()
        .map(|id| {
            titles
                .get(id)
                .cloned()
                .unwrap_or_else(|| format!("id({})", id))
        })
        .collect();

    titles.sort();
    titles.join(", ")
}

fn query_users(controller: &MovieNightController, by: &SearchBy) -> Result<(), Error> {
    for user in controller.users_by(by)? {
        println!("{}", user.to_table());
    }

    Ok(())
}

fn query_items(controller: &MovieNightController, by: &SearchBy) -> Result<(), Error> {
    for item in controller.items_by(by)? {
        println!("{}", item.to_table());
    }

    Ok(())
}

fn query_ratings(controller: &MovieNightController, by: &SearchBy) -> Result<(), Error> {
    for user in controller.users_by(by)? {
        let ratings = controller.user_ratings(&user)?;
        if ratings.is_empty() {
            println!("No ratings found for id({})", user.get_id());
        } else {
            println!("{}", ratings.to_table());
        }
    }

    Ok(())
}

fn rate(
    controller: &MovieNightController,
    user_by: &SearchBy,
    item_by: &SearchBy,
    level: Level,
) -> Result<(), Error> {
    let user = first_user(controller, user_by)?;
    let item = first_item(controller, item_by)?;

    controller.submit_rating(&user.get_id(), &item.get_id(), level)?;
    println!("{} now rates {} as {}", user.name(), item.title(), level);

    Ok(())
}

fn ranking(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    by: &SearchBy,
) -> Result<(), Error> {
    let category = first_category(controller, by)?;
    let ranked = engine.ranking(&category)?;

    println!("Ranking for {}:", category.name);
    for (place, item) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<40} {:>5.1} ({} ratings)",
            place + 1,
            item.title,
            item.score.display_score,
            item.score.rating_count
        );
    }

    Ok(())
}

fn decades(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    by: &SearchBy,
) -> Result<(), Error> {
    let category = first_category(controller, by)?;

    for (decade, items) in engine.decade_ranking(&category)? {
        println!("-- {}s --", decade);
        for item in items {
            println!(
                "     {:<40} {:>5.1} ({} ratings)",
                item.title, item.score.display_score, item.score.rating_count
            );
        }
    }

    Ok(())
}

fn divisive(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    by: &SearchBy,
) -> Result<(), Error> {
    let category = first_category(controller, by)?;

    println!("Most divisive in {}:", category.name);
    for (place, item) in engine.divisive_ranking(&category)?.iter().enumerate() {
        println!("{:>3}. {:<40} spread {:.2}", place + 1, item.title, item.spread);
    }

    Ok(())
}

fn eclectic(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    by: &SearchBy,
) -> Result<(), Error> {
    let category = first_category(controller, by)?;
    let titles = item_titles(controller)?;

    println!("Most eclectic in {}:", category.name);
    for (place, (name, scored)) in engine.eclectic_ranking(&category)?.iter().enumerate() {
        let contrarian: HashSet<i32> = scored.contrarian.iter().copied().collect();

        println!(
            "{:>3}. {:<20} {:>5.1}% ({} of {} against the grain)",
            place + 1,
            name,
            scored.disagreement_ratio * 100.0,
            scored.disagreements,
            scored.rated,
        );

        if !contrarian.is_empty() {
            println!("     contrarian picks: {}", titled(&contrarian, &titles));
        }
    }

    Ok(())
}

fn compare(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    a_by: &SearchBy,
    b_by: &SearchBy,
) -> Result<(), Error> {
    let user_a = first_user(controller, a_by)?;
    let user_b = first_user(controller, b_by)?;
    let comparison = engine.compare(&user_a, &user_b)?;

    if !comparison.has_overlap() {
        println!(
            "{} and {} have no shared ratings yet",
            user_a.name(),
            user_b.name()
        );
        return Ok(());
    }

    let titles = item_titles(controller)?;

    println!(
        "{} and {} agree on {:.0}% of {} shared items",
        user_a.name(),
        user_b.name(),
        comparison.agreement_ratio * 100.0,
        comparison.shared.len()
    );

    if !comparison.both_loved.is_empty() {
        println!("Both loved: {}", titled(&comparison.both_loved, &titles));
    }

    if !comparison.both_hated.is_empty() {
        println!("Both hated: {}", titled(&comparison.both_hated, &titles));
    }

    if !comparison.opposite_extremes.is_empty() {
        println!(
            "Opposite extremes: {}",
            titled(&comparison.opposite_extremes, &titles)
        );
    }

    if !comparison.disagreements.is_empty() {
        println!("Disagreements: {}", titled(&comparison.disagreements, &titles));
    }

    if !comparison.only_a.is_empty() {
        println!(
            "Only {}: {}",
            user_a.name(),
            titled(&comparison.only_a, &titles)
        );
    }

    if !comparison.only_b.is_empty() {
        println!(
            "Only {}: {}",
            user_b.name(),
            titled(&comparison.only_b, &titles)
        );
    }

    Ok(())
}

fn compare_triple(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    a_by: &SearchBy,
    b_by: &SearchBy,
    c_by: &SearchBy,
) -> Result<(), Error> {
    let user_a = first_user(controller, a_by)?;
    let user_b = first_user(controller, b_by)?;
    let user_c = first_user(controller, c_by)?;

    let triple = engine.compare_triple(&user_a, &user_b, &user_c)?;
    let titles = item_titles(controller)?;

    let regions = [
        (format!("Only {}", user_a.name()), &triple.a_only),
        (format!("Only {}", user_b.name()), &triple.b_only),
        (format!("Only {}", user_c.name()), &triple.c_only),
        (
            format!("{} and {}", user_a.name(), user_b.name()),
            &triple.ab,
        ),
        (
            format!("{} and {}", user_a.name(), user_c.name()),
            &triple.ac,
        ),
        (
            format!("{} and {}", user_b.name(), user_c.name()),
            &triple.bc,
        ),
        ("All three".to_owned(), &triple.abc),
    ];

    for (label, set) in &regions {
        if set.is_empty() {
            println!("{}: none", label);
        } else {
            println!("{}: {}", label, titled(set, &titles));
        }
    }

    Ok(())
}

fn next_up(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    user_by: &SearchBy,
    category_by: &SearchBy,
) -> Result<(), Error> {
    let user = first_user(controller, user_by)?;
    let category = first_category(controller, category_by)?;

    let pending = engine.next_up(&user, &category)?;
    if pending.is_empty() {
        println!("{} has rated everything in {}", user.name(), category.name);
        return Ok(());
    }

    println!("Next up for {}:", user.name());
    for (place, item) in pending.iter().enumerate() {
        println!("{:>3}. {}", place + 1, item.title());
    }

    Ok(())
}

fn profile(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    user_by: &SearchBy,
    key: SortKey,
) -> Result<(), Error> {
    let user = first_user(controller, user_by)?;
    let summary = engine.profile(&user, key)?;

    println!(
        "{} rated {} items: {}% loved, {}% liked, {}% okay, {}% disliked, {}% hated",
        user.name(),
        summary.counts.rated(),
        summary.percent(Level::Loved),
        summary.percent(Level::Liked),
        summary.percent(Level::Okay),
        summary.percent(Level::Disliked),
        summary.percent(Level::Hated),
    );

    for row in &summary.rows {
        let year = row
            .year
            .map(|year| format!("({})", year))
            .unwrap_or_default();

        println!("{:<40} {:>6} {}", row.title, year, row.level);
    }

    Ok(())
}

fn run_statement(
    controller: &MovieNightController,
    engine: &Engine<'_, MovieNightController>,
    statement: Statement,
) {
    let outcome = match statement {
        Statement::QueryUser(by) => query_users(controller, &by),
        Statement::QueryItem(by) => query_items(controller, &by),
        Statement::QueryRatings(by) => query_ratings(controller, &by),
        Statement::Rate(user_by, item_by, level) => rate(controller, &user_by, &item_by, level),
        Statement::Ranking(by) => ranking(controller, engine, &by),
        Statement::Decades(by) => decades(controller, engine, &by),
        Statement::Divisive(by) => divisive(controller, engine, &by),
        Statement::Eclectic(by) => eclectic(controller, engine, &by),
        Statement::Compare(a_by, b_by) => compare(controller, engine, &a_by, &b_by),
        Statement::CompareTriple(a_by, b_by, c_by) => {
            compare_triple(controller, engine, &a_by, &b_by, &c_by)
        }
        Statement::NextUp(user_by, category_by) => {
            next_up(controller, engine, &user_by, &category_by)
        }
        Statement::Profile(user_by, key) => profile(controller, engine, &user_by, key),
    };

    if let Err(e) = outcome {
        println!("{}", e);
    }
}

fn main() -> Result<(), Error> {
    TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
    )?;

    let matches = App::new("popquiz")
        .version(VERSION)
        .about("Team movie voting shell")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("Path to the configuration file"),
        )
        .get_matches();

    let config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::load("config.toml").unwrap_or_else(|e| {
            log::warn!("Couldn't load config.toml ({}), using defaults", e);
            Config::default()
        }),
    };

    println!("Welcome to popquiz {}", VERSION);

    let controller = MovieNightController::new()?;
    let engine = Engine::with_controller(&controller, &config.engine);

    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let line: String = prompt!(rl)?;

        match line.trim() {
            "?" | "h" | "help" => print_help(),

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(statement) => run_statement(&controller, &engine, statement),
                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}
