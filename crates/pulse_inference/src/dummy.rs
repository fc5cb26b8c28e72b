use async_trait::async_trait;

use pulse_core::{GenerationOptions, Result, TextGenerator};

/// Offline generator for tests and key-less local runs. Short token budgets
/// get a digest line, everything else a full parseable article.
#[derive(Debug, Default)]
pub struct DummyGenerator;

const DIGEST_BUDGET: u32 = 200;

const ARTICLE: &str = "title: Markets Hold Their Breath Ahead of Data Week\n\
body:\n\
Equities drifted sideways as traders squared positions ahead of a heavy data calendar.\n\
The Facts:\n\
Major indexes closed within half a percent of Friday's levels.\n\
Volume ran below the thirty-day average across the board.\n\
Market Impact:\n\
Rate-sensitive sectors outperformed while energy lagged on soft crude.\n\
Key Takeaways:\n\
- Positioning is light into the inflation print\n\
- Breadth remains narrow with leadership in megacaps\n\
- Volatility pricing implies a one percent move on release day\n";

const DIGEST: &str =
    "Markets idle ahead of a packed data week: light volume, narrow breadth, and options pricing a 1% move on the inflation print.";

#[async_trait]
impl TextGenerator for DummyGenerator {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, _prompt: &str, opts: &GenerationOptions) -> Result<String> {
        if opts.max_tokens <= DIGEST_BUDGET {
            Ok(DIGEST.to_string())
        } else {
            Ok(ARTICLE.to_string())
        }
    }
}
