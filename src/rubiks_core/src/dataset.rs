//! Building and cleaning prompt/response datasets.

use fastrand::Rng;
use log::{debug, info, warn};

use crate::{
    Error,
    codec::encode,
    cube::CubeState,
    formula::Formula,
    record::RecordFormat,
};

/// Parameters for [`generate_samples`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub n_samples: usize,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            n_samples: 10000,
            min_length: 1,
            max_length: 10,
        }
    }
}

/// A scrambled cube together with a formula that solves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub scramble: Formula,
    pub prompt: String,
    pub response: Formula,
}

impl Sample {
    /// Scramble a solved cube with `scramble` and pair its config string
    /// with the simplified inverse of the scramble.
    ///
    /// Returns `None` if the response fails to solve the cube.
    ///
    /// # Errors
    ///
    /// Propagates encoding failures.
    pub fn from_scramble(scramble: Formula) -> Result<Option<Sample>, Error> {
        let mut cube = CubeState::solved();
        cube.apply(&scramble);
        let prompt = encode(&cube)?.to_string();

        let response = scramble.inverse().optimize();
        cube.apply(&response);
        if !cube.is_solved() {
            warn!(target: "dataset", "Response {response} does not solve scramble {scramble}");
            return Ok(None);
        }

        Ok(Some(Sample {
            scramble,
            prompt,
            response,
        }))
    }

    pub fn render(&self, format: &RecordFormat) -> String {
        format.render(&self.prompt, &self.response.to_string())
    }
}

/// Scramble lengths run uniformly from `min_length` to `max_length`, with
/// `ceil(n_samples / lengths)` samples per length, so slightly more than
/// `n_samples` may be produced.
///
/// # Errors
///
/// Propagates encoding failures.
pub fn generate_samples(options: &GenerateOptions, rng: &mut Rng) -> Result<Vec<Sample>, Error> {
    if options.max_length < options.min_length {
        return Ok(Vec::new());
    }

    let lengths = options.max_length - options.min_length + 1;
    let per_length = options.n_samples.div_ceil(lengths);
    info!(
        target: "dataset",
        "Generating {per_length} samples for each of {lengths} lengths"
    );

    let mut samples = Vec::with_capacity(per_length * lengths);
    for length in options.min_length..=options.max_length {
        for _ in 0..per_length {
            if let Some(sample) = Sample::from_scramble(Formula::random(rng, length))? {
                samples.push(sample);
            }
        }
        debug!(target: "dataset", "Finished length {length}: {} samples", samples.len());
    }

    Ok(samples)
}

/// The first field is the scramble and the second the solution. Any further
/// fields are ignored.
fn pair_solves(line: &str, delim: &str) -> Result<bool, Error> {
    let mut fields = line.split(delim);
    let (Some(scramble), Some(solution)) = (fields.next(), fields.next()) else {
        return Err(Error::ParseFailure(line.to_owned()));
    };

    let mut cube = CubeState::solved();
    cube.apply_str(scramble)?;
    cube.apply_str(solution)?;
    Ok(cube.is_solved())
}

/// Keep the `scramble<delim>solution` lines whose solution solves the
/// scramble.
pub fn clean_pairs<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    delim: &str,
) -> Vec<&'a str> {
    lines
        .into_iter()
        .filter(|line| match pair_solves(line, delim) {
            Ok(solves) => solves,
            Err(e) => {
                debug!(target: "dataset", "Dropping line: {e}");
                false
            }
        })
        .collect()
}

/// Turn `prompt<delim>response` lines into record lines, with a space after
/// the prompt and response markers. Lines without the delimiter are skipped.
pub fn reformat_pairs<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    delim: &str,
    format: &RecordFormat,
) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let Some((prompt, response)) = line.split_once(delim) else {
                debug!(target: "dataset", "Skipping line without delimiter: {line:?}");
                return None;
            };

            Some(format.render(&format!(" {prompt}"), &format!(" {response}")))
        })
        .collect()
}
