use log::LevelFilter;

pub struct Logger;

impl Logger {
    pub fn init(level: LevelFilter) {
        let mut builder = colog::default_builder();
        builder.filter_level(level);

        if let Err(e) = builder.try_init() {
            eprintln!("logger already initialised: {}", e);
        }
    }
}
