//! Human-readable report of a call.

use std::fmt::Write;

use alloy_primitives::{hex, Bytes};
use child_deployer::{codec::decode_i64, constants::status_word, VmOutput};

/// Renders the return code, the finish values and the changed accounts of `output`.
pub fn render_output(output: &VmOutput) -> String {
    let mut report = String::new();
    // Writing to a `String` cannot fail.
    let _ = writeln!(report, "return code: {} ({})", output.return_code.code(), output.return_code);
    if !output.return_message.is_empty() {
        let _ = writeln!(report, "message: {}", output.return_message);
    }

    for (index, data) in output.return_data.iter().enumerate() {
        let _ = writeln!(report, "finish[{index}]: {}", render_finish_value(data));
    }

    for account in output.output_accounts.values() {
        let _ = write!(
            report,
            "account {:?}: nonce {}, balance {} (delta {})",
            account.address, account.nonce, account.balance, account.balance_delta
        );
        if let (Some(code), Some(deployer)) = (&account.code, &account.code_deployer) {
            let _ = write!(report, ", deployed {} bytes by {deployer:?}", code.len());
        }
        report.push('\n');
    }
    report
}

/// A finish value as hex, followed by its status word or int64 reading.
pub fn render_finish_value(data: &Bytes) -> String {
    let encoded = hex::encode_prefixed(data);
    let word = [status_word::SUCCESS, status_word::FAILURE, status_word::UNKNOWN]
        .into_iter()
        .find(|word| *word == &data[..]);
    match (word, decode_i64(data)) {
        (Some(word), _) => format!("{encoded} \"{}\"", String::from_utf8_lossy(word)),
        (None, Some(value)) => format!("{encoded} = {value}"),
        (None, None) => encoded,
    }
}
