use std::path::PathBuf;

use typesmith_core::Colors;
use typesmith_module::{Module, dump};

pub struct DumpArgs {
    pub module_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let module = match Module::from_path(&args.module_path) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("error: {}: {}", args.module_path.display(), e);
            std::process::exit(1);
        }
    };

    let colors = Colors::new(args.color);
    print!("{}", dump(&module, colors));
}
