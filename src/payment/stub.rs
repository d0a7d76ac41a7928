use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::domain::{OrderDraft, PaymentMethod};

use super::{PaymentError, PaymentGateway, PaymentResult};

const TRANSACTION_SUFFIX_LEN: usize = 9;
const TRANSACTION_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Simulation profile for one payment method: how long the fake
/// processor "works" and how often it approves.
#[derive(Debug, Clone)]
pub struct MethodProfile {
    pub method: PaymentMethod,
    pub delay: Duration,
    pub success_rate: f64,
    pub transaction_prefix: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
}

impl MethodProfile {
    /// The four Czech rails the storefront offers. Dobírka always
    /// approves; no money moves until the package is handed over.
    pub fn defaults() -> Vec<MethodProfile> {
        vec![
            MethodProfile {
                method: PaymentMethod::Comgate,
                delay: Duration::from_millis(2000),
                success_rate: 0.90,
                transaction_prefix: "CG",
                success_message: "Platba úspěšně dokončena",
                failure_message: "Platba se nezdařila",
            },
            MethodProfile {
                method: PaymentMethod::Dobirka,
                delay: Duration::from_millis(1000),
                success_rate: 1.0,
                transaction_prefix: "DB",
                success_message: "Objednávka připravena k odběru s platbou dobírkou",
                failure_message: "Platba se nezdařila",
            },
            MethodProfile {
                method: PaymentMethod::Card,
                delay: Duration::from_millis(3000),
                success_rate: 0.85,
                transaction_prefix: "CARD",
                success_message: "Platba kartou úspěšně dokončena",
                failure_message: "Platba kartou byla odmítnuta",
            },
            MethodProfile {
                method: PaymentMethod::GooglePay,
                delay: Duration::from_millis(1500),
                success_rate: 0.95,
                transaction_prefix: "GP",
                success_message: "Google Pay platba úspěšná",
                failure_message: "Google Pay platba se nezdařila",
            },
        ]
    }
}

/// Simulated payment processor.
///
/// Authorization is a timed coin flip per the method profile. The rng
/// is owned and seedable so outcomes can be made deterministic, and the
/// profile table is injectable so tests can force approvals or
/// declines outright.
pub struct StubGateway {
    profiles: Vec<MethodProfile>,
    rng: Mutex<StdRng>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            profiles: MethodProfile::defaults(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            profiles: MethodProfile::defaults(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replaces the profile table; methods without a profile are
    /// reported as unsupported.
    pub fn with_profiles(mut self, profiles: Vec<MethodProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    fn profile(&self, method: PaymentMethod) -> Option<MethodProfile> {
        self.profiles.iter().find(|p| p.method == method).cloned()
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn mint_transaction_id(&self, prefix: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let mut rng = self.rng();
        let suffix: String = (0..TRANSACTION_SUFFIX_LEN)
            .map(|_| {
                let index = rng.gen_range(0..TRANSACTION_ALPHABET.len());
                TRANSACTION_ALPHABET[index] as char
            })
            .collect();
        format!("{prefix}_{millis}_{suffix}")
    }

    fn sample_success(&self, rate: f64) -> bool {
        if rate >= 1.0 {
            return true;
        }
        self.rng().gen::<f64>() < rate
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for StubGateway {
    async fn authorize(
        &self,
        method: &str,
        draft: &OrderDraft,
    ) -> Result<PaymentResult, PaymentError> {
        // Unknown codes fail immediately; only known methods get the
        // simulated processing delay.
        let profile = PaymentMethod::parse(method)
            .and_then(|parsed| self.profile(parsed))
            .ok_or_else(|| {
                warn!(method = %method, "unsupported payment method");
                PaymentError::UnsupportedMethod(method.to_string())
            })?;

        tokio::time::sleep(profile.delay).await;

        if self.sample_success(profile.success_rate) {
            let transaction_id = self.mint_transaction_id(profile.transaction_prefix);
            info!(
                method = %profile.method.code(),
                transaction_id = %transaction_id,
                total_price = draft.total_price,
                "simulated authorization approved"
            );
            Ok(PaymentResult {
                success: true,
                transaction_id: Some(transaction_id),
                method: profile.method.code().to_string(),
                message: profile.success_message.to_string(),
            })
        } else {
            info!(
                method = %profile.method.code(),
                total_price = draft.total_price,
                "simulated authorization declined"
            );
            Ok(PaymentResult {
                success: false,
                transaction_id: None,
                method: profile.method.code().to_string(),
                message: profile.failure_message.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, CheckoutForm, OrderDraft};

    fn draft(payment_method: &str) -> OrderDraft {
        let form = CheckoutForm {
            name: "Jan Novák".to_string(),
            email: "jan@example.cz".to_string(),
            phone: "+420123456789".to_string(),
            payment_method: payment_method.to_string(),
            ..CheckoutForm::default()
        };
        let items = vec![CartItem::new(1, "Matrace — 160×200", 5000.0, 1)];
        OrderDraft::from_form(&form, items).unwrap()
    }

    fn profile_with_rate(method: PaymentMethod, success_rate: f64) -> Vec<MethodProfile> {
        MethodProfile::defaults()
            .into_iter()
            .map(|mut p| {
                if p.method == method {
                    p.success_rate = success_rate;
                }
                p
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn every_method_resolves() {
        let gateway = StubGateway::seeded(1);
        for code in ["comgate", "dobirka", "card", "googlepay"] {
            let result = gateway.authorize(code, &draft(code)).await.unwrap();
            assert_eq!(result.method, code);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dobirka_always_approves() {
        let gateway = StubGateway::seeded(42);
        for _ in 0..10 {
            let result = gateway.authorize("dobirka", &draft("dobirka")).await.unwrap();
            assert!(result.success);
            assert!(result.transaction_id.unwrap().starts_with("DB_"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unsupported_method_fails_without_delay() {
        let gateway = StubGateway::seeded(1);
        let before = tokio::time::Instant::now();

        let err = gateway.authorize("bitcoin", &draft("bitcoin")).await.unwrap_err();

        assert_eq!(err, PaymentError::UnsupportedMethod("bitcoin".to_string()));
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn declined_attempts_carry_no_transaction_id() {
        let gateway = StubGateway::seeded(1)
            .with_profiles(profile_with_rate(PaymentMethod::Card, 0.0));

        for _ in 0..2 {
            let result = gateway.authorize("card", &draft("card")).await.unwrap();
            assert!(!result.success);
            assert_eq!(result.transaction_id, None);
            assert_eq!(result.message, "Platba kartou byla odmítnuta");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn successive_approvals_mint_distinct_ids() {
        let gateway = StubGateway::seeded(9)
            .with_profiles(profile_with_rate(PaymentMethod::Card, 1.0));

        let first = gateway.authorize("card", &draft("card")).await.unwrap();
        let second = gateway.authorize("card", &draft("card")).await.unwrap();

        assert_ne!(first.transaction_id, second.transaction_id);
    }

    #[tokio::test(start_paused = true)]
    async fn method_without_profile_is_unsupported() {
        let gateway = StubGateway::seeded(1).with_profiles(Vec::new());
        let err = gateway.authorize("card", &draft("card")).await.unwrap_err();
        assert_eq!(err, PaymentError::UnsupportedMethod("card".to_string()));
    }
}
