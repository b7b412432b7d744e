pub mod seaorm;

pub use seaorm::SeaOrmLocationRepository;
