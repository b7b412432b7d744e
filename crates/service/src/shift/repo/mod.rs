pub mod seaorm;

pub use seaorm::SeaOrmShiftRepository;
