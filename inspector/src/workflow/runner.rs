use crate::workflow::config::InspectConfig;
use anyhow::Context;
use erscore::math::{ChannelStats, FftHelper};
use erscore::telemetry::ReadMetrics;
use erscore::{DataPatch, ParserContext, PatchRead, RadarParameters};
use serde::Serialize;

/// Summary of one decoded patch.
#[derive(Debug, Clone, Serialize)]
pub struct PatchSummary {
    pub azimuth_start: usize,
    pub n_azimuth: usize,
    pub n_range: usize,
    pub stats: ChannelStats,
    /// Strongest non-DC bin of the first line's range spectrum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrum_peak: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectionResult {
    pub parameters: RadarParameters,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    pub patches: Vec<PatchSummary>,
    pub end_of_data: bool,
    pub metrics: ReadMetrics,
}

pub struct Runner {
    config: InspectConfig,
}

fn spectrum_peak(patch: &DataPatch, fft: &FftHelper) -> Option<usize> {
    let spectrum = patch.range_spectrum(0, fft)?;
    spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(bin, _)| bin)
}

impl Runner {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<InspectionResult> {
        let (ldr, raw) = self.config.inputs()?;
        let mut ctx = ParserContext::open(ldr, raw)
            .with_context(|| format!("opening {} / {}", ldr.display(), raw.display()))?;

        let parameters = ctx
            .load_parameters()
            .with_context(|| format!("loading parameters from {}", ldr.display()))?;

        let fields = if self.config.fields {
            ctx.dump_leader_fields()
                .context("dumping leader fields")?
                .into_iter()
                .map(|(field, text)| (field.name().to_string(), text))
                .collect()
        } else {
            Vec::new()
        };

        let fft = self
            .config
            .spectrum
            .then(|| FftHelper::new(parameters.range_fft_len));

        let mut patches = Vec::new();
        let mut end_of_data = false;
        while self.config.max_patches == 0 || patches.len() < self.config.max_patches {
            let outcome = ctx
                .read_patch()
                .with_context(|| format!("reading raw data from {}", raw.display()))?;
            let patch = match outcome {
                PatchRead::Patch(patch) => patch,
                PatchRead::EndOfData {
                    required,
                    available,
                } => {
                    log::info!(
                        "raw data exhausted after {} lines ({available} of {required} bytes left)",
                        ctx.azimuth_position()
                    );
                    end_of_data = true;
                    break;
                }
            };

            patches.push(PatchSummary {
                azimuth_start: patch.azimuth_start(),
                n_azimuth: patch.n_azimuth(),
                n_range: patch.n_range(),
                stats: patch.stats(),
                spectrum_peak: fft.as_ref().and_then(|fft| spectrum_peak(&patch, fft)),
            });
        }

        let metrics = ctx.metrics();
        log::debug!("read metrics: {:?}", metrics);
        ctx.close();

        Ok(InspectionResult {
            parameters,
            fields,
            patches,
            end_of_data,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{write_product, GeneratorConfig};

    fn config_for(dir: &std::path::Path, generator: &GeneratorConfig) -> InspectConfig {
        let product = write_product(dir, generator).unwrap();
        InspectConfig {
            ldr: Some(product.leader),
            raw: Some(product.raw),
            ..Default::default()
        }
    }

    #[test]
    fn runner_decodes_requested_patches() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = InspectConfig {
            max_patches: 2,
            ..config_for(dir.path(), &GeneratorConfig::default())
        };

        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.parameters.azimuth_fft_len, 4);
        assert_eq!(result.patches.len(), 2);
        assert_eq!(result.patches[1].azimuth_start, 4);
        assert_eq!(result.patches[0].n_range, 5616);
        assert!(!result.end_of_data);
        assert!(result.fields.is_empty());
    }

    #[test]
    fn runner_reads_until_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let generator = GeneratorConfig {
            lines: 10,
            ..Default::default()
        };
        let cfg = InspectConfig {
            max_patches: 0,
            fields: true,
            spectrum: true,
            ..config_for(dir.path(), &generator)
        };

        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.patches.len(), 2);
        assert!(result.end_of_data);
        assert_eq!(result.metrics.end_of_data, 1);
        assert_eq!(result.fields[0], ("mission_id".to_string(), "ERS-SYNTH".to_string()));

        let stats = result.patches[0].stats;
        assert!((stats.mean_i - 127.5).abs() < 2.0);
        assert!(result.patches[0].spectrum_peak.is_some());
    }

    #[test]
    fn runner_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = InspectConfig {
            ldr: Some(dir.path().join("missing.ldr")),
            raw: Some(dir.path().join("missing.raw")),
            ..Default::default()
        };
        let err = Runner::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("missing.ldr"));
    }
}
