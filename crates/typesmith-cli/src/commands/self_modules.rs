use typesmith_core::Colors;
use typesmith_lib::SELF_MODULES;
use typesmith_lib::self_modules::SELF_MODULE_VERSION;

pub struct SelfModulesArgs {
    pub color: bool,
}

pub fn run(args: SelfModulesArgs) {
    let c = Colors::new(args.color);
    println!("Self modules ({}):", SELF_MODULES.len());
    for module in SELF_MODULES {
        println!(
            "  {}{}{} v{} {}({} types){}",
            c.blue,
            module.name,
            c.reset,
            SELF_MODULE_VERSION,
            c.dim,
            module.types.len(),
            c.reset
        );
    }
}
