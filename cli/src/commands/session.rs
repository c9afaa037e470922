use anyhow::{Context, Result, bail};
use std::io::{self, Write};

use kalori_core::TrackerService;
use kalori_core::models::{Goal, Unit};

use super::helpers::{
    parse_amount, parse_food_amount, parse_unit, print_entry_table, print_food_table, serving_line,
};
use super::resolve_food;
use super::summary::print_summary;
use super::target::print_metrics;

const HELP: &str = "\
Commands:
  profile <height cm> <weight kg> [lose|gain]   set body profile
  search <text>                                 search foods
  foods                                         list all foods
  add <food> <amount>                           log a food (2, 1.5p, 150g, 2 portions)
  add <food>=<amount>                           same, for names with digits
  remove <id>                                   remove a logged entry
  list                                          show logged entries
  clear [log|profile|all]                       forget entries, profile or both
  summary                                       totals against the daily target
  help                                          show this help
  quit                                          exit (the log is not saved)";

#[derive(Debug, PartialEq)]
enum SessionCommand {
    Profile {
        height_cm: f64,
        weight_kg: f64,
        goal: Goal,
    },
    Search(String),
    Foods,
    Add {
        food: String,
        amount: f64,
        unit: Unit,
    },
    Remove(i64),
    List,
    Clear(ClearScope),
    Summary,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ClearScope {
    Log,
    Profile,
    All,
}

/// Split "tavuk göğsü 150g" or "pilav 2 portions" into food and amount.
fn split_food_amount(rest: &str) -> Result<(String, f64, Unit)> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    let n = words.len();
    if n < 2 {
        bail!("Usage: add <food> <amount>");
    }
    // "2 portions": a bare number followed by a unit word
    let spaced_unit = n >= 3
        && words[n - 2].parse::<f64>().is_ok()
        && parse_unit(words[n - 1]).is_ok();
    let split = if spaced_unit { n - 2 } else { n - 1 };

    let (amount, unit) = parse_amount(&words[split..].join(" "))?;
    Ok((words[..split].join(" "), amount, unit))
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_lowercase().as_str() {
        "profile" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() < 2 || parts.len() > 3 {
                bail!("Usage: profile <height cm> <weight kg> [lose|gain]");
            }
            let height_cm: f64 = parts[0]
                .parse()
                .with_context(|| format!("Invalid height '{}'", parts[0]))?;
            let weight_kg: f64 = parts[1]
                .parse()
                .with_context(|| format!("Invalid weight '{}'", parts[1]))?;
            let goal = match parts.get(2) {
                Some(g) => g.parse()?,
                None => Goal::Lose,
            };
            SessionCommand::Profile {
                height_cm,
                weight_kg,
                goal,
            }
        }
        "search" | "s" => SessionCommand::Search(rest.to_string()),
        "foods" => SessionCommand::Foods,
        "add" | "a" => {
            let (food, amount, unit) = if rest.contains('=') {
                parse_food_amount(rest)?
            } else {
                split_food_amount(rest)?
            };
            if food.is_empty() {
                bail!("Usage: add <food> <amount>");
            }
            SessionCommand::Add { food, amount, unit }
        }
        "remove" | "rm" => {
            let id: i64 = rest
                .parse()
                .with_context(|| format!("Invalid entry id '{rest}'"))?;
            SessionCommand::Remove(id)
        }
        "list" | "ls" => SessionCommand::List,
        "clear" => {
            let scope = match rest.to_lowercase().as_str() {
                "" | "log" => ClearScope::Log,
                "profile" => ClearScope::Profile,
                "all" => ClearScope::All,
                other => bail!("Unknown clear target '{other}'. Use log, profile or all"),
            };
            SessionCommand::Clear(scope)
        }
        "summary" => SessionCommand::Summary,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => bail!("Unknown command '{other}'. Type 'help' for a list"),
    };
    Ok(Some(command))
}

fn execute(service: &mut TrackerService, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Profile {
            height_cm,
            weight_kg,
            goal,
        } => {
            service.set_profile(height_cm, weight_kg, goal)?;
            match service.metrics() {
                Some(metrics) => print_metrics(&metrics, goal, service.config()),
                None => eprintln!("Height and weight must both be greater than 0 to compute BMI"),
            }
        }
        SessionCommand::Search(query) => {
            let results = service.search_foods(&query);
            if results.is_empty() {
                eprintln!("No results found for '{query}'");
            } else {
                print_food_table(&results);
            }
        }
        SessionCommand::Foods => {
            let foods: Vec<_> = service.catalog().records().iter().collect();
            print_food_table(&foods);
        }
        SessionCommand::Add { food, amount, unit } => {
            let Some(record) = resolve_food(service, &food)? else {
                bail!("No food found for '{food}'");
            };
            let entry = service.log_food(record.id, amount, unit)?;
            let line = serving_line(&entry.name, entry.portions, entry.grams, entry.calories);
            println!("Added [{}] {line}", entry.id);
        }
        SessionCommand::Remove(id) => {
            if service.remove_entry(id) {
                println!("Removed entry {id}");
            } else {
                eprintln!("No entry with id {id}");
            }
        }
        SessionCommand::List => {
            if service.entries().is_empty() {
                println!("No foods logged yet. Start tracking your meals!");
            } else {
                print_entry_table(service.entries());
            }
        }
        SessionCommand::Clear(scope) => {
            if matches!(scope, ClearScope::Log | ClearScope::All) {
                service.clear_entries();
                println!("Food log cleared");
            }
            if matches!(scope, ClearScope::Profile | ClearScope::All) && service.clear_profile() {
                println!("Profile cleared");
            }
        }
        SessionCommand::Summary => print_summary(&service.daily_summary()),
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => {}
    }
    Ok(())
}

pub(crate) fn cmd_session(service: &mut TrackerService) -> Result<()> {
    eprintln!("kalori session. Type 'help' for commands, 'quit' to exit.");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        eprint!("> ");
        io::stderr().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = execute(service, command) {
                    eprintln!("Error: {e:#}");
                }
            }
            Err(e) => eprintln!("Error: {e:#}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command("   \n").unwrap(), None);
    }

    #[test]
    fn test_parse_profile() {
        let cmd = parse_command("profile 170 70 gain").unwrap().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Profile {
                height_cm: 170.0,
                weight_kg: 70.0,
                goal: Goal::Gain,
            }
        );
    }

    #[test]
    fn test_parse_profile_default_goal() {
        let cmd = parse_command("profile 165.5 58").unwrap().unwrap();
        assert!(matches!(
            cmd,
            SessionCommand::Profile {
                goal: Goal::Lose,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_profile_invalid() {
        assert!(parse_command("profile 170").is_err());
        assert!(parse_command("profile tall 70").is_err());
        assert!(parse_command("profile 170 70 maintain").is_err());
    }

    #[test]
    fn test_parse_add_with_space() {
        let cmd = parse_command("add tavuk göğsü 150g").unwrap().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Add {
                food: "tavuk göğsü".to_string(),
                amount: 150.0,
                unit: Unit::Grams,
            }
        );
    }

    #[test]
    fn test_parse_add_with_equals() {
        let cmd = parse_command("add pilav=2").unwrap().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Add {
                food: "pilav".to_string(),
                amount: 2.0,
                unit: Unit::Portions,
            }
        );
    }

    #[test]
    fn test_parse_add_with_spaced_unit() {
        let cmd = parse_command("add pilav 150 grams").unwrap().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Add {
                food: "pilav".to_string(),
                amount: 150.0,
                unit: Unit::Grams,
            }
        );

        let cmd = parse_command("add tavuk göğsü 2 portions").unwrap().unwrap();
        assert_eq!(
            cmd,
            SessionCommand::Add {
                food: "tavuk göğsü".to_string(),
                amount: 2.0,
                unit: Unit::Portions,
            }
        );
    }

    #[test]
    fn test_parse_add_bad_unit() {
        assert!(parse_command("add pilav 2 cups").is_err());
        assert!(parse_command("add 2 grams").is_err());
    }

    #[test]
    fn test_parse_add_missing_amount() {
        assert!(parse_command("add pilav").is_err());
        assert!(parse_command("add").is_err());
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(
            parse_command("rm 3").unwrap().unwrap(),
            SessionCommand::Remove(3)
        );
        assert!(parse_command("remove x").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("LIST").unwrap().unwrap(), SessionCommand::List);
        assert_eq!(
            parse_command("summary").unwrap().unwrap(),
            SessionCommand::Summary
        );
        assert_eq!(parse_command("q").unwrap().unwrap(), SessionCommand::Quit);
        assert_eq!(
            parse_command("search  yoğurt ").unwrap().unwrap(),
            SessionCommand::Search("yoğurt".to_string())
        );
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(
            parse_command("clear").unwrap().unwrap(),
            SessionCommand::Clear(ClearScope::Log)
        );
        assert_eq!(
            parse_command("clear ALL").unwrap().unwrap(),
            SessionCommand::Clear(ClearScope::All)
        );
        assert!(parse_command("clear everything").is_err());
    }

    #[test]
    fn test_execute_clear() {
        let mut svc = TrackerService::new();
        execute(
            &mut svc,
            SessionCommand::Profile {
                height_cm: 170.0,
                weight_kg: 70.0,
                goal: Goal::Gain,
            },
        )
        .unwrap();
        svc.log_food(2, 1.0, Unit::Portions).unwrap();

        execute(&mut svc, SessionCommand::Clear(ClearScope::Log)).unwrap();
        assert!(svc.entries().is_empty());
        assert!(svc.profile().is_some());

        svc.log_food(2, 1.0, Unit::Portions).unwrap();
        execute(&mut svc, SessionCommand::Clear(ClearScope::All)).unwrap();
        assert!(svc.entries().is_empty());
        assert!(svc.profile().is_none());
        assert!(svc.daily_summary().target.is_none());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_execute_add_and_remove() {
        let mut svc = TrackerService::new();
        execute(
            &mut svc,
            SessionCommand::Add {
                food: "zeytin".to_string(),
                amount: 30.0,
                unit: Unit::Grams,
            },
        )
        .unwrap();
        assert_eq!(svc.entries().len(), 1);
        let id = svc.entries()[0].id;

        execute(&mut svc, SessionCommand::Remove(id)).unwrap();
        assert!(svc.entries().is_empty());
    }

    #[test]
    fn test_execute_add_unknown_food() {
        let mut svc = TrackerService::new();
        let result = execute(
            &mut svc,
            SessionCommand::Add {
                food: "pizza".to_string(),
                amount: 1.0,
                unit: Unit::Portions,
            },
        );
        assert!(result.is_err());
        assert!(svc.entries().is_empty());
    }

    #[test]
    fn test_execute_profile() {
        let mut svc = TrackerService::new();
        execute(
            &mut svc,
            SessionCommand::Profile {
                height_cm: 170.0,
                weight_kg: 70.0,
                goal: Goal::Lose,
            },
        )
        .unwrap();
        assert_eq!(svc.metrics().unwrap().target, 1800);
    }
}
