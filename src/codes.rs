//! Response-code table for the transaction service

/// Response code for an approved or completed transaction
pub const APPROVED: &str = "00";

/// Whether `code` indicates an approved transaction
pub fn is_approved(code: &str) -> bool {
    code == APPROVED
}

fn lookup(code: &str) -> Option<&'static str> {
    let message = match code {
        "00" => "Approved or completed successfully",
        "01" => "Refer to card issuer",
        "02" => "Refer to card issuer, special condition",
        "03" => "Invalid merchant",
        "04" => "Pick-up card",
        "05" => "Do not honor",
        "06" => "Error",
        "07" => "Pick-up card, special condition",
        "08" => "Honor with identification",
        "10" => "Approved, partial",
        "11" => "VIP Approval",
        "12" => "Invalid transaction",
        "13" => "Invalid amount",
        "14" => "Invalid card number",
        "15" => "No such issuer",
        "17" => "Customer cancellation",
        "19" => "Re-enter transaction",
        "21" => "No action taken",
        "25" => "Unable to locate record",
        "28" => "File update file locked",
        "30" => "Format error",
        // MasterCard reversal requests for less than the original amount
        "32" => "Completed partially",
        "39" => "No credit account",
        "41" => "Lost card, pick-up",
        "43" => "Stolen card, pick-up",
        "51" => "Not sufficient funds",
        "52" => "No checking account",
        "53" => "No savings account",
        "54" => "Expired card",
        "55" => "Incorrect PIN",
        "57" => "Transaction not permitted to cardholder",
        "58" => "Transaction not permitted on terminal",
        "59" => "Suspected fraud",
        "61" => "Exceeds withdrawal limit",
        "62" => "Restricted card",
        "63" => "Security violation",
        "65" => "Exceeds withdrawal frequency",
        "68" => "Response received too late",
        "69" => "Advice received too late",
        "70" => "Reserved for future use",
        "75" => "PIN tries exceeded",
        "76" => {
            "Reversal: Unable to locate previous message (no match on Retrieval Reference Number)."
        }
        "77" => {
            "Previous message located for a repeat or reversal, but repeat or reversal data is inconsistent with original message."
        }
        "78" => "Invalid/non-existent account – Decline (MasterCard specific)",
        "79" => "Already reversed (by Switch)",
        "80" => "No financial Impact (Reserved for declined debit)",
        "81" => "PIN cryptographic error found by the Visa security module during PIN decryption.",
        "82" => "Incorrect CVV",
        "83" => "Unable to verify PIN",
        "84" => "Invalid Authorization Life Cycle – Decline (MasterCard) or Duplicate Transaction Detected (Visa)",
        "85" => "No reason to decline a request for Account Number Verification or Address Verification",
        "86" => "Cannot verify PIN",
        "91" => "Issuer or switch inoperative",
        "92" => "Destination Routing error",
        "93" => "Violation of law",
        "94" => "Duplicate Transmission (Integrated Debit and MasterCard)",
        "96" => "System malfunction",
        "B1" => "Surcharge amount not permitted on Visa cards or EBT Food Stamps",
        "B2" => "Surcharge amount not supported by debit network issuer",
        "N0" => "Force STIP",
        "N3" => "Cash service not available",
        "N4" => "Cash request exceeds Issuer limit",
        "N5" => "Ineligible for re-submission",
        "N7" => "Decline for CVV2 failure",
        "N8" => "Transaction amount exceeds preauthorized approval amount",
        "P0" => "Approved; PVID code is missing, invalid, or has expired",
        "P1" => "Declined; PVID code is missing, invalid, or has expired",
        "P2" => "Invalid biller Information",
        "R0" => {
            "The transaction was declined or returned, because the cardholder requested that payment of a specific recurring or installment payment transaction be stopped."
        }
        "R1" => {
            "The transaction was declined or returned, because the cardholder requested that payment of all recurring or installment payment transactions for a specific merchant account be stopped."
        }
        "Q1" => "Card Authentication failed",
        "XA" => "Forward to Issuer",
        "XD" => "Forward to Issuer",
        _ => return None,
    };
    Some(message)
}

/// Human-readable message for a response code
///
/// Unknown codes, including fault text carried as a code, fall back to
/// `Unhandled Error Code: {code}`.
pub fn message_for(code: &str) -> String {
    match lookup(code) {
        Some(message) => message.to_string(),
        None => format!("Unhandled Error Code: {}", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approved_code() {
        assert!(is_approved("00"));
        assert!(!is_approved("51"));
        assert!(!is_approved("0"));
    }

    #[test]
    fn test_known_messages() {
        assert_eq!(message_for("00"), "Approved or completed successfully");
        assert_eq!(message_for("05"), "Do not honor");
        assert_eq!(message_for("51"), "Not sufficient funds");
        assert_eq!(message_for("54"), "Expired card");
        assert_eq!(message_for("N7"), "Decline for CVV2 failure");
        assert_eq!(message_for("XD"), "Forward to Issuer");
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert_eq!(message_for("b1"), "Unhandled Error Code: b1");
        assert_eq!(
            message_for("B1"),
            "Surcharge amount not permitted on Visa cards or EBT Food Stamps"
        );
    }

    #[test]
    fn test_unknown_code_fallback() {
        assert_eq!(
            message_for("(S:Server) Validation Failure"),
            "Unhandled Error Code: (S:Server) Validation Failure"
        );
        assert_eq!(message_for("ZZ"), "Unhandled Error Code: ZZ");
    }
}
