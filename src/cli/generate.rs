//! Generate command: Compiles the instruction table into emulator source

use crate::cli::common::{assemble, write_outputs};
use crate::dispatch::GenerationReport;
use crate::project::Target;
use std::io;

pub fn generate(target: &Target) -> io::Result<()> {
    let asm = assemble(target)?;
    let name = target.dialect();
    let dialect = name.dialect();

    let mut source = Vec::new();
    asm.emit(dialect.as_ref(), &mut source)?;

    let report = GenerationReport::new(&asm, name, dialect.as_ref());
    let mut report_text = Vec::new();
    let mut outputs = vec![(target.output(), source.as_slice())];

    if let Some(path) = target.report() {
        report.write(&mut report_text)?;
        outputs.push((Some(path), report_text.as_slice()));
    }

    write_outputs(&outputs)?;

    log::info!(
        "Generated {} {} units and {} delegates",
        report.units(),
        name.friendly_name(),
        report.delegates()
    );

    Ok(())
}
