//! Chat command parsing.
//!
//! Commands are space-delimited: `/gasto 50 Nu super`. The command word is
//! case-insensitive and may carry Telegram's `@BotName` suffix.

use cartera_core::ledger::{AccountName, Amount};

use crate::error::CommandError;

/// Number of movements `/historial` shows without an argument.
pub const DEFAULT_HISTORY: u64 = 10;
/// Upper bound for `/historial <n>`.
pub const MAX_HISTORY: u64 = 50;

/// Category for `/gasto`.
pub const EXPENSE_CATEGORY: &str = "Varios";
/// Category and default description for `/tc`.
pub const CREDIT_CARD_CATEGORY: &str = "Tarjeta";
/// Account charged by `/tc`.
pub const CREDIT_CARD_ACCOUNT: &str = "Tc";

/// Usage hints shown when arguments are missing or malformed.
#[allow(missing_docs)]
pub mod usage {
    pub const INGRESO: &str = "❌ Uso: /ingreso <monto> [detalle]\nEj: /ingreso 6450 Quincena";
    pub const GASTO: &str = "❌ Uso: /gasto <monto> [cuenta] [detalle]\nEj: /gasto 50 comida";
    pub const PAGAR: &str = "❌ Uso: /pagar <monto> <tarjeta/persona>\nEj: /pagar 500 Nu";
    pub const DEUDA: &str = "❌ Uso: /deuda <monto> <nombre> [detalle]\nEj: /deuda 500 Nu super";
    pub const DEBE: &str = "❌ Uso: /debe <monto> <persona> [detalle]\nEj: /debe 300 Juan comida";
    pub const PAGO: &str = "❌ Uso: /pago <monto> <persona>\nEj: /pago 300 Juan";
    pub const TC: &str = "❌ Uso: /tc <monto> [detalle]\nEj: /tc 350 gasolina";
    pub const HISTORIAL: &str = "❌ Uso: /historial [cantidad]\nEj: /historial 20";
}

/// A fixed-amount expense on the cash account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    /// Command word without the slash.
    pub command: &'static str,
    /// Amount in centavos.
    pub minor: i64,
    /// Category recorded on the movement.
    pub category: &'static str,
    /// Description recorded on the movement.
    pub description: &'static str,
    /// Emoji used in the confirmation.
    pub emoji: &'static str,
    /// What the confirmation calls it.
    pub label: &'static str,
}

/// Transport shortcuts.
pub const SHORTCUTS: [Shortcut; 5] = [
    Shortcut {
        command: "escuela",
        minor: 2200,
        category: "Transporte",
        description: "Gasto diario UPIITA",
        emoji: "🚌",
        label: "Gasto de la escuela",
    },
    Shortcut {
        command: "metro",
        minor: 500,
        category: "Transporte",
        description: "Metro",
        emoji: "🚇",
        label: "Metro",
    },
    Shortcut {
        command: "camion",
        minor: 850,
        category: "Transporte",
        description: "Camión",
        emoji: "🚌",
        label: "Camión",
    },
    Shortcut {
        command: "rtp",
        minor: 200,
        category: "Transporte",
        description: "RTP",
        emoji: "🚌",
        label: "RTP",
    },
    Shortcut {
        command: "directo",
        minor: 2000,
        category: "Transporte",
        description: "Directo / Micro",
        emoji: "🚐",
        label: "Directo",
    },
];

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/ingreso <monto> [detalle]`
    Income {
        /// Amount received.
        amount: Amount,
        /// Free text, may be empty.
        description: String,
    },
    /// `/gasto <monto> [cuenta] [detalle]`
    ///
    /// Whether the first word names an account is only known once the
    /// store has been consulted, so the words are kept raw.
    Expense {
        /// Amount spent.
        amount: Amount,
        /// Remaining words after the amount.
        words: Vec<String>,
    },
    /// `/pagar <monto> <cuenta>`
    PayDebt {
        /// Amount paid from cash.
        amount: Amount,
        /// Account being paid.
        account: AccountName,
    },
    /// `/saldo` or `/balance`
    Summary,
    /// `/deuda <monto> <nombre> [detalle]`
    Debt {
        /// Amount owed.
        amount: Amount,
        /// Creditor account.
        account: AccountName,
        /// Free text, may be empty.
        description: String,
    },
    /// `/debe <monto> <persona> [detalle]`
    Receivable {
        /// Amount lent.
        amount: Amount,
        /// Debtor.
        person: AccountName,
        /// Free text, may be empty.
        description: String,
    },
    /// `/pago <monto> <persona>`
    PaymentReceived {
        /// Amount paid back.
        amount: Amount,
        /// Debtor.
        person: AccountName,
    },
    /// One of the [`SHORTCUTS`].
    Shortcut(Shortcut),
    /// `/tc <monto> [detalle]`
    CreditCard {
        /// Amount charged.
        amount: Amount,
        /// Free text, may be empty.
        description: String,
    },
    /// `/historial [n]`
    History {
        /// How many movements to show.
        limit: u64,
    },
}

impl Command {
    /// Parses a message.
    ///
    /// Returns `Ok(None)` for plain text and unknown commands.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Usage`] when a known command has missing or
    /// malformed arguments.
    pub fn parse(text: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = text.split_whitespace();
        let Some(head) = tokens.next().and_then(|t| t.strip_prefix('/')) else {
            return Ok(None);
        };
        let word = head.split('@').next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = tokens.collect();

        let command = match word.as_str() {
            "start" => Self::Start,
            "saldo" | "balance" => Self::Summary,
            "ingreso" => Self::Income {
                amount: amount_arg(&args, usage::INGRESO)?,
                description: remainder(&args, 1),
            },
            "gasto" => Self::Expense {
                amount: amount_arg(&args, usage::GASTO)?,
                words: args.iter().skip(1).map(|w| (*w).to_string()).collect(),
            },
            "pagar" => Self::PayDebt {
                amount: amount_arg(&args, usage::PAGAR)?,
                account: name_arg(&args, usage::PAGAR)?,
            },
            "deuda" => Self::Debt {
                amount: amount_arg(&args, usage::DEUDA)?,
                account: name_arg(&args, usage::DEUDA)?,
                description: remainder(&args, 2),
            },
            "debe" => Self::Receivable {
                amount: amount_arg(&args, usage::DEBE)?,
                person: name_arg(&args, usage::DEBE)?,
                description: remainder(&args, 2),
            },
            "pago" => Self::PaymentReceived {
                amount: amount_arg(&args, usage::PAGO)?,
                person: name_arg(&args, usage::PAGO)?,
            },
            "tc" => Self::CreditCard {
                amount: amount_arg(&args, usage::TC)?,
                description: remainder(&args, 1),
            },
            "historial" => Self::History {
                limit: history_limit(&args)?,
            },
            other => match SHORTCUTS.iter().find(|s| s.command == other) {
                Some(shortcut) => Self::Shortcut(*shortcut),
                None => return Ok(None),
            },
        };

        Ok(Some(command))
    }

    /// Returns the command word, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Income { .. } => "ingreso",
            Self::Expense { .. } => "gasto",
            Self::PayDebt { .. } => "pagar",
            Self::Summary => "saldo",
            Self::Debt { .. } => "deuda",
            Self::Receivable { .. } => "debe",
            Self::PaymentReceived { .. } => "pago",
            Self::Shortcut(shortcut) => shortcut.command,
            Self::CreditCard { .. } => "tc",
            Self::History { .. } => "historial",
        }
    }
}

fn amount_arg(args: &[&str], hint: &'static str) -> Result<Amount, CommandError> {
    args.first()
        .and_then(|raw| raw.parse().ok())
        .ok_or(CommandError::Usage(hint))
}

fn name_arg(args: &[&str], hint: &'static str) -> Result<AccountName, CommandError> {
    args.get(1)
        .and_then(|raw| AccountName::parse(raw).ok())
        .ok_or(CommandError::Usage(hint))
}

fn remainder(args: &[&str], from: usize) -> String {
    args.get(from..).map(|rest| rest.join(" ")).unwrap_or_default()
}

fn history_limit(args: &[&str]) -> Result<u64, CommandError> {
    match args.first() {
        None => Ok(DEFAULT_HISTORY),
        Some(raw) => match raw.parse::<u64>() {
            Ok(0) | Err(_) => Err(CommandError::Usage(usage::HISTORIAL)),
            Ok(n) => Ok(n.min(MAX_HISTORY)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn parse(text: &str) -> Option<Command> {
        Command::parse(text).unwrap()
    }

    fn amount(value: rust_decimal::Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).unwrap()
    }

    #[rstest]
    #[case("hola")]
    #[case("")]
    #[case("/desconocido 5")]
    #[case("  ")]
    fn test_non_commands_are_ignored(#[case] text: &str) {
        assert_eq!(parse(text), None);
    }

    #[rstest]
    #[case("/start", Command::Start)]
    #[case("/START", Command::Start)]
    #[case("/saldo", Command::Summary)]
    #[case("/balance@CarteraBot", Command::Summary)]
    #[case("/historial", Command::History { limit: DEFAULT_HISTORY })]
    #[case("/historial 3", Command::History { limit: 3 })]
    #[case("/historial 500", Command::History { limit: MAX_HISTORY })]
    fn test_argument_free_commands(#[case] text: &str, #[case] expected: Command) {
        assert_eq!(parse(text), Some(expected));
    }

    #[test]
    fn test_income_with_description() {
        assert_eq!(
            parse("/ingreso 6450 Quincena de octubre"),
            Some(Command::Income {
                amount: amount(dec!(6450)),
                description: "Quincena de octubre".into(),
            })
        );
    }

    #[test]
    fn test_income_without_description() {
        assert_eq!(
            parse("/ingreso 100"),
            Some(Command::Income {
                amount: amount(dec!(100)),
                description: String::new(),
            })
        );
    }

    #[test]
    fn test_expense_keeps_raw_words() {
        assert_eq!(
            parse("/gasto 8.5 nu tacos al pastor"),
            Some(Command::Expense {
                amount: amount(dec!(8.5)),
                words: vec!["nu".into(), "tacos".into(), "al".into(), "pastor".into()],
            })
        );
    }

    #[test]
    fn test_pay_debt_normalizes_account() {
        assert_eq!(
            parse("/pagar 500 NU"),
            Some(Command::PayDebt {
                amount: amount(dec!(500)),
                account: name("Nu"),
            })
        );
    }

    #[test]
    fn test_debt_and_receivable() {
        assert_eq!(
            parse("/deuda 500 Nu super"),
            Some(Command::Debt {
                amount: amount(dec!(500)),
                account: name("Nu"),
                description: "super".into(),
            })
        );
        assert_eq!(
            parse("/debe 300 juan"),
            Some(Command::Receivable {
                amount: amount(dec!(300)),
                person: name("Juan"),
                description: String::new(),
            })
        );
        assert_eq!(
            parse("/pago 300 Juan"),
            Some(Command::PaymentReceived {
                amount: amount(dec!(300)),
                person: name("Juan"),
            })
        );
    }

    #[rstest]
    #[case("/escuela", 2200)]
    #[case("/metro", 500)]
    #[case("/camion", 850)]
    #[case("/rtp", 200)]
    #[case("/directo@CarteraBot", 2000)]
    fn test_shortcuts(#[case] text: &str, #[case] minor: i64) {
        match parse(text) {
            Some(Command::Shortcut(shortcut)) => {
                assert_eq!(shortcut.minor, minor);
                assert_eq!(shortcut.category, "Transporte");
            }
            other => panic!("expected shortcut, got {other:?}"),
        }
    }

    #[test]
    fn test_credit_card_shortcut() {
        assert_eq!(
            parse("/tc 350 gasolina"),
            Some(Command::CreditCard {
                amount: amount(dec!(350)),
                description: "gasolina".into(),
            })
        );
    }

    #[rstest]
    #[case("/ingreso", usage::INGRESO)]
    #[case("/ingreso mucho", usage::INGRESO)]
    #[case("/gasto -5", usage::GASTO)]
    #[case("/gasto 0", usage::GASTO)]
    #[case("/pagar 500", usage::PAGAR)]
    #[case("/pagar Nu 500", usage::PAGAR)]
    #[case("/deuda 500", usage::DEUDA)]
    #[case("/debe abc Juan", usage::DEBE)]
    #[case("/pago 300", usage::PAGO)]
    #[case("/tc", usage::TC)]
    #[case("/historial muchos", usage::HISTORIAL)]
    #[case("/historial 0", usage::HISTORIAL)]
    fn test_bad_arguments_yield_usage(#[case] text: &str, #[case] hint: &str) {
        match Command::parse(text) {
            Err(CommandError::Usage(actual)) => assert_eq!(actual, hint),
            other => panic!("expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn test_command_names() {
        assert_eq!(parse("/camion").unwrap().name(), "camion");
        assert_eq!(parse("/balance").unwrap().name(), "saldo");
    }
}
