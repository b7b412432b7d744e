pub mod seaorm;

pub use seaorm::SeaOrmWorkerRepository;
