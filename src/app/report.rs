use crate::domain::model::{HeuristicThresholds, Outcome, Verdict};

pub const BANNER: &str = r"
_______________________       ________     _____           _____
___  __ \_  ____/__    |      ___  __ \______  /_____________  /______________
__  / / /  / __ __  /| |      __  / / /  _ \  __/  _ \  ___/  __/  __ \_  ___/
_  /_/ // /_/ / _  ___ |      _  /_/ //  __/ /_ /  __/ /__ / /_ / /_/ /  /
/_____/ \____/  /_/  |_|      /_____/ \___/\__/ \___/\___/ \__/ \____//_/
";

/// Human-readable analysis of one domain, as printed in single-domain mode.
pub fn render_outcome(outcome: &Outcome, thresholds: &HeuristicThresholds) -> String {
    match outcome {
        Outcome::Scored(verdict) => render_verdict(verdict, thresholds),
        Outcome::Skipped { reason, .. } => format!("{}\n", reason.message()),
    }
}

pub fn render_verdict(verdict: &Verdict, thresholds: &HeuristicThresholds) -> String {
    let mut out = String::from("Analysing domain...\n");
    let record = &verdict.record;

    // Values are truncated to whole numbers, matching the historical output.
    if let Some(entropy) = verdict.flags.high_entropy {
        out.push_str(&format!(
            "High entropy(>{}) is a strong indicator of DGA domain.\nThis domain scored: {}\n",
            thresholds.entropy,
            entropy.trunc() as i64
        ));
    }
    if let Some(consonants) = verdict.flags.high_consonants {
        out.push_str(&format!(
            "High consonants(>{}) count is an indicator of DGA domain\nThis domain scored: {}\n",
            thresholds.consonants, consonants
        ));
    }
    if let Some(length) = verdict.flags.long_domain {
        out.push_str(&format!(
            "Long domain name(>{}) can also indicate DGA\nThis domain scored: {}\n",
            thresholds.length, length
        ));
    }

    if verdict.is_dga {
        out.push_str(&format!("Domain {} is DGA!\n", verdict.domain));
    } else {
        out.push_str(&format!(
            "Domain {} is not DGA! Probably safe :)\n\
             Don't quote me on that though\n\
             Additional information: \n\
             Entropy: {}\n\
             Consonants count: {}\n\
             Name length: {}\n",
            verdict.domain,
            record.entropy.trunc() as i64,
            record.consonants,
            record.length
        ));
    }
    out
}
