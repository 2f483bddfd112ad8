//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use clap::Args;

use crate::{
    app::{DEFAULT_TABLE_PATH, EngineConfig, TableFormat},
    types::SamplingFloor,
};

/// Table location and engine options common to every command
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Path of the persisted value table
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Table encoding (guessed from the extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<TableFormat>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Smallest sampling weight an action keeps (must be greater than 0)
    #[arg(long, default_value_t = SamplingFloor::DEFAULT)]
    pub sampling_floor: SamplingFloor,
}

impl TableArgs {
    pub fn engine_config(&self) -> EngineConfig {
        let mut config =
            EngineConfig::new(self.table.clone()).with_sampling_floor(self.sampling_floor);
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

impl Default for TableArgs {
    fn default() -> Self {
        Self {
            table: PathBuf::from(DEFAULT_TABLE_PATH),
            format: None,
            seed: None,
            sampling_floor: SamplingFloor::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        table: TableArgs,
    }

    #[test]
    fn test_sampling_floor_must_be_positive() {
        for bad in ["0", "-1", "nan", "inf"] {
            let arg = format!("--sampling-floor={bad}");
            assert!(
                Harness::try_parse_from(["qtictactoe", arg.as_str()]).is_err(),
                "{bad} accepted"
            );
        }

        let parsed = Harness::try_parse_from(["qtictactoe", "--sampling-floor", "0.02"]).unwrap();
        assert_eq!(parsed.table.sampling_floor.value(), 0.02);
        assert_eq!(
            parsed.table.engine_config().sampling_floor,
            SamplingFloor::new(0.02).unwrap()
        );
    }

    #[test]
    fn test_sampling_floor_default() {
        let parsed = Harness::try_parse_from(["qtictactoe"]).unwrap();
        assert_eq!(parsed.table.sampling_floor, SamplingFloor::DEFAULT);
    }

    #[test]
    fn test_format_override_wins_over_extension() {
        let args = TableArgs {
            table: PathBuf::from("weights.json"),
            format: Some(TableFormat::MsgPack),
            seed: Some(3),
            ..TableArgs::default()
        };
        let config = args.engine_config();
        assert_eq!(config.format, TableFormat::MsgPack);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_extension_used_without_override() {
        let args = TableArgs {
            table: PathBuf::from("weights.msgpack"),
            ..TableArgs::default()
        };
        assert_eq!(args.engine_config().format, TableFormat::MsgPack);
    }
}
