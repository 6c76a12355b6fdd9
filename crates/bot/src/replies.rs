//! Reply texts.
//!
//! Replies use Telegram's legacy `Markdown` parse mode. Anything the user
//! typed is escaped before it is interpolated.

use cartera_core::ledger::{
    AccountName, Amount, FinancialSummary, LedgerError, Movement, MovementKind,
};
use cartera_shared::types::format_money;
use rust_decimal::Decimal;

use crate::commands::Shortcut;

/// Sent to anyone but the allow-listed user.
pub const UNAUTHORIZED: &str = "🚫 No tienes permiso para usar este bot.";

/// Sent when storage fails.
pub const INTERNAL_ERROR: &str =
    "⚠️ Ocurrió un error interno y el movimiento no se guardó. Intenta de nuevo.";

const HELP: &str = "👋 ¡Hola! Tu control financiero total está listo:\n\n\
*💰 GESTIÓN DE DINERO*\n\
• /ingreso <monto> <detalle> - Dinero que entra a tu efectivo.\n\
• /gasto <monto> <cuenta> <detalle> - Gasto rápido (cuenta opcional, por defecto tu efectivo).\n\
• /saldo - Tu balance real, deudas y préstamos.\n\
• /historial <n> - Tus últimos movimientos.\n\n\
*💳 CUENTAS POR PAGAR (Tus deudas)*\n\
• /deuda <monto> <nombre> <detalle> - Lo que debes a tarjetas o personas.\n\
• /pagar <monto> <nombre> - Liquidar tus deudas con tu efectivo.\n\
• /tc <monto> <detalle> - Cargo a la tarjeta de crédito.\n\n\
*🤝 CUENTAS POR COBRAR (Te deben)*\n\
• /debe <monto> <persona> <detalle> - Dinero que prestaste a alguien.\n\
• /pago <monto> <persona> - Cuando te devuelven dinero (suma a tu efectivo).\n\n\
*🚌 ATAJOS DE TRANSPORTE*\n\
• /escuela ($22) | /metro ($5) | /camion ($8.5)\n\
• /rtp ($2) | /directo ($20)";

/// A rendered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Message text.
    pub text: String,
    /// Whether `text` is legacy Markdown.
    pub markdown: bool,
}

impl Reply {
    /// A Markdown reply.
    #[must_use]
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
        }
    }

    /// A plain-text reply.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
        }
    }
}

/// Escapes the characters legacy Markdown treats as entity markers.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `/start`
#[must_use]
pub fn help() -> Reply {
    Reply::markdown(HELP)
}

/// Usage hints contain `<` and `[`, so they go out as plain text.
#[must_use]
pub fn usage(hint: &str) -> Reply {
    Reply::plain(hint)
}

/// Reply for a rejected bookkeeping rule.
#[must_use]
pub fn ledger_error(err: &LedgerError) -> Reply {
    let text = match err {
        LedgerError::InvalidAmount(raw) => format!("❌ Monto inválido: {raw}"),
        LedgerError::NonPositiveAmount => "❌ El monto debe ser mayor a cero.".to_string(),
        LedgerError::AmountOutOfRange => "❌ El monto está fuera de rango.".to_string(),
        LedgerError::EmptyAccountName => "❌ Falta el nombre de la cuenta.".to_string(),
        LedgerError::ReservedAccount(account) => {
            format!("❌ La cuenta {account} no se puede usar para este movimiento.")
        }
        LedgerError::UnknownMovementKind(_) => INTERNAL_ERROR.to_string(),
    };
    Reply::plain(text)
}

/// `/ingreso`
#[must_use]
pub fn income(amount: Amount, account: &AccountName) -> Reply {
    Reply::markdown(format!(
        "✅ Recibido: *{amount}* en {}.",
        escape_markdown(account.as_str())
    ))
}

/// `/gasto` on a real-money account. `via` names the debit-like account
/// the payment went through, if it was not plain cash.
#[must_use]
pub fn real_expense(amount: Amount, via: Option<&AccountName>, description: &str) -> Reply {
    let via = via
        .map(|account| format!(" ({})", escape_markdown(account.as_str())))
        .unwrap_or_default();
    Reply::markdown(format!(
        "💸 Restados *{amount}* de tu efectivo{via} por: {}.",
        escape_markdown(description)
    ))
}

/// `/gasto` or `/tc` on a liability account.
#[must_use]
pub fn credit_expense(
    amount: Amount,
    account: &AccountName,
    description: &str,
    balance: Option<Decimal>,
) -> Reply {
    let mut text = format!(
        "💳 Cargados *{amount}* a {} por: {}.",
        escape_markdown(account.as_str()),
        escape_markdown(description)
    );
    if let Some(balance) = balance.filter(|b| b.is_sign_negative()) {
        text.push_str(&format!("\nDeuda actual: {}", format_money(balance.abs())));
    }
    Reply::markdown(text)
}

/// Transport shortcuts.
#[must_use]
pub fn shortcut(shortcut: &Shortcut, amount: Amount) -> Reply {
    Reply::markdown(format!(
        "{} {} registrado: *{amount}* restados de tu efectivo.",
        shortcut.emoji, shortcut.label
    ))
}

/// `/pagar`
#[must_use]
pub fn debt_payment(amount: Amount, account: &AccountName) -> Reply {
    Reply::markdown(format!(
        "✅ Pagado: *{amount}* a {}. Se descontó de tu efectivo.",
        escape_markdown(account.as_str())
    ))
}

/// `/deuda`
#[must_use]
pub fn debt(amount: Amount, account: &AccountName) -> Reply {
    Reply::markdown(format!(
        "💳 Anotada deuda de *{amount}* en {}.",
        escape_markdown(account.as_str())
    ))
}

/// `/debe`; `owed` is the person's balance after the loan.
#[must_use]
pub fn receivable(person: &AccountName, owed: Decimal) -> Reply {
    Reply::markdown(format!(
        "💰 Registro: {} ahora te debe *{}*.",
        escape_markdown(person.as_str()),
        format_money(owed)
    ))
}

/// `/pago`
#[must_use]
pub fn payment_received(amount: Amount, person: &AccountName) -> Reply {
    Reply::markdown(format!(
        "✅ ¡Dinero recibido de {}! Se sumaron *{amount}* a tu disponible.",
        escape_markdown(person.as_str())
    ))
}

/// `/saldo`
#[must_use]
pub fn summary(summary: &FinancialSummary) -> Reply {
    let mut text = String::from("🏦 *ESTADO FINANCIERO*\n");
    text.push_str(&format!(
        "💰 *Dinero Disponible:* {}\n\n",
        format_money(summary.available)
    ));

    if !summary.receivables.is_empty() {
        text.push_str("📈 *CUENTAS POR COBRAR:*\n");
        for line in &summary.receivables {
            text.push_str(&format!(
                "🔹 {}: {}\n",
                escape_markdown(line.account.as_str()),
                format_money(line.amount)
            ));
        }
        text.push_str(&format!(
            "*Total a favor:* {}\n\n",
            format_money(summary.total_receivable)
        ));
    }

    if !summary.payables.is_empty() {
        text.push_str("📉 *CUENTAS POR PAGAR:*\n");
        for line in &summary.payables {
            text.push_str(&format!(
                "🔸 {}: {}\n",
                escape_markdown(line.account.as_str()),
                format_money(line.amount)
            ));
        }
        text.push_str(&format!(
            "*Total deuda:* {}\n\n",
            format_money(summary.total_debt)
        ));
    }

    text.push_str(&format!(
        "✨ *Ahorro Neto Real:* {}",
        format_money(summary.net_worth)
    ));
    Reply::markdown(text)
}

/// `/historial`; `movements` are newest first.
#[must_use]
pub fn history(movements: &[Movement]) -> Reply {
    if movements.is_empty() {
        return Reply::plain("📭 Aún no hay movimientos registrados.");
    }

    let mut text = match movements.len() {
        1 => String::from("📜 *Último movimiento*\n"),
        n => format!("📜 *Últimos {n} movimientos*\n"),
    };
    for movement in movements {
        text.push_str(&format!(
            "\n`{}` {} {} *{}* {}",
            movement.recorded_at.format("%d/%m %H:%M"),
            kind_label(movement.kind),
            escape_markdown(movement.account.as_str()),
            movement.amount,
            escape_markdown(&movement.description)
        ));
    }
    Reply::markdown(text)
}

const fn kind_label(kind: MovementKind) -> &'static str {
    match kind {
        MovementKind::Income => "💵 Ingreso",
        MovementKind::RealExpense => "💸 Gasto",
        MovementKind::CreditExpense => "💳 Cargo",
        MovementKind::DebtPayment => "✅ Pago",
        MovementKind::PaymentReceived => "💰 Cobro",
        MovementKind::LoanGiven => "🤝 Préstamo",
    }
}
