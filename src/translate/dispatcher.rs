// Thu Oct 15 2026 - Alex

use crate::code::CodeEntity;
use crate::config::TranslationContext;
use crate::translate::buffer::CodeBuffer;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::from_armax::FromArmax;
use crate::translate::quirk::QuirkTranslator;
use crate::translate::reader::WordReader;
use crate::translate::to_armax::ToArmax;
use crate::translate::OpcodeTranslator;
use rayon::prelude::*;

fn translator_for(ctx: &TranslationContext) -> Box<dyn OpcodeTranslator> {
    if ctx.source.is_armax() {
        Box::new(FromArmax::new(ctx))
    } else if ctx.destination.is_armax() {
        Box::new(ToArmax::new(ctx))
    } else {
        Box::new(QuirkTranslator::new(ctx))
    }
}

/// Translates one code in place.
///
/// Same-dialect contexts return at once. Without error suppression the
/// first failing opcode aborts and `entity` is left untouched. With it, a
/// failing opcode's partial output is dropped, the rest of the code is
/// still translated and swapped in, and the last error seen is returned.
pub fn translate(entity: &mut CodeEntity, ctx: &TranslationContext) -> TranslateResult<()> {
    if ctx.is_identity() {
        return Ok(());
    }

    let mut translator = translator_for(ctx);
    let mut reader = WordReader::new(&entity.words);
    let mut out = CodeBuffer::with_capacity(entity.words.len());
    let mut last_error = None;

    while !reader.is_empty() {
        let mark = out.len();
        let at = reader.position();

        if let Err(err) = translator.translate_opcode(&mut reader, &mut out) {
            if !ctx.suppress_errors {
                log::debug!("'{}': word {}: {}", entity.name, at, err);
                return Err(err);
            }
            log::warn!("'{}': word {}: {} (skipped)", entity.name, at, err);
            out.truncate(mark);
            last_error = Some(err);
        }
    }

    log::debug!(
        "'{}': {} -> {}, {} -> {} words",
        entity.name,
        ctx.source,
        ctx.destination,
        entity.words.len(),
        out.len()
    );
    entity.words = out.into_words();

    match last_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub id: u32,
    pub name: String,
    pub error: TranslateError,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub translated: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Translates every code independently; each gets the same context.
pub fn translate_all(entities: &mut [CodeEntity], ctx: &TranslationContext) -> BatchReport {
    let failures: Vec<BatchFailure> = entities
        .par_iter_mut()
        .filter_map(|entity| {
            translate(entity, ctx).err().map(|error| BatchFailure {
                id: entity.id,
                name: entity.name.clone(),
                error,
            })
        })
        .collect();

    let report = BatchReport {
        translated: entities.len() - failures.len(),
        failures,
    };
    log::info!("Translated {} codes, {} failed", report.translated, report.failed());
    report
}
