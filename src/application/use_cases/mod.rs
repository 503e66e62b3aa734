/// Use cases module containing application business logic orchestration
mod process_finding;

pub use process_finding::ProcessFindingUseCase;
