use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{BuilderBot, GreedyBot, HumanBot, RandomBot};
use crate::error::GameError;

/// Parameters handed to a registered constructor.
pub struct BotArgs<'a> {
    /// Text after the first ':' in the spec, if any.
    pub arg: Option<&'a str>,
    pub index: usize,
    pub seed: u64,
}

/// Registered bot kind.
pub struct BotEntry {
    pub label: &'static str,
    pub about: &'static str,
    pub interactive: bool,
    pub create: fn(&BotArgs<'_>) -> Box<dyn Bot>,
}

/// Every bot a spec string can name, in the order they are listed to users.
pub static REGISTRY: &[BotEntry] = &[
    BotEntry {
        label: "greedy",
        about: "takes any pile that raises its score, otherwise draws",
        interactive: false,
        create: create_greedy,
    },
    BotEntry {
        label: "builder",
        about: "draws while any pile has room, then takes the best pile",
        interactive: false,
        create: create_builder,
    },
    BotEntry {
        label: "random",
        about: "random[:seed] picks uniformly among legal moves",
        interactive: false,
        create: create_random,
    },
    BotEntry {
        label: "human",
        about: "human[:name] plays from the terminal",
        interactive: true,
        create: create_human,
    },
];

fn create_greedy(_: &BotArgs<'_>) -> Box<dyn Bot> {
    Box::new(GreedyBot::new())
}

fn create_builder(_: &BotArgs<'_>) -> Box<dyn Bot> {
    Box::new(BuilderBot::new())
}

fn create_random(args: &BotArgs<'_>) -> Box<dyn Bot> {
    let seed = args
        .arg
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(args.seed ^ ((args.index as u64 + 1) * 0x9E37_79B9));
    Box::new(RandomBot::new(StdRng::seed_from_u64(seed)))
}

fn create_human(args: &BotArgs<'_>) -> Box<dyn Bot> {
    let name = args
        .arg
        .map(|name| name.trim().to_string())
        .unwrap_or_else(|| format!("Human {}", args.index));
    Box::new(HumanBot::new(name))
}

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

pub fn lookup(spec: &str) -> Option<&'static BotEntry> {
    let label = label_for_spec(spec);
    REGISTRY.iter().find(|entry| entry.label == label)
}

/// Create a bot instance from a CLI-style spec such as `greedy`, `random:7`
/// or `human:Alice`.
pub fn create_bot_from_spec(spec: &str, index: usize, seed: u64) -> Result<Box<dyn Bot>, GameError> {
    let entry = lookup(spec).ok_or_else(|| {
        GameError::config(format!(
            "unrecognized bot spec '{spec}' (known: {})",
            REGISTRY
                .iter()
                .map(|entry| entry.label)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;
    let args = BotArgs {
        arg: spec.split_once(':').map(|(_, arg)| arg),
        index,
        seed,
    };
    Ok((entry.create)(&args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_ignore_case_and_arguments() {
        assert_eq!(label_for_spec("Random:42"), "random");
        assert_eq!(label_for_spec(" greedy "), "greedy");
    }

    #[test]
    fn every_registered_label_resolves() {
        for entry in REGISTRY {
            assert!(create_bot_from_spec(entry.label, 0, 1).is_ok());
        }
        assert!(lookup("human:Ann").is_some_and(|entry| entry.interactive));
    }

    #[test]
    fn unknown_spec_is_a_configuration_error() {
        let err = create_bot_from_spec("oracle", 0, 1).err();
        assert!(matches!(err, Some(GameError::InvalidConfiguration(_))));
    }
}
