//! # Repository Module
//!
//! Database repository implementations for PrintHouse.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  db.print_houses().get_by_name("Main Street")                  │
//! │       ▼                                                                 │
//! │  PrintHouseRepository                                                  │
//! │  ├── insert / get_by_id / get_by_name / list                           │
//! │  ├── update / delete                                                   │
//! │  └── replace_all                                                       │
//! │                                                                         │
//! │  EditionRepository                                                     │
//! │  ├── add / get / list / remove                                         │
//! │  └── replace_all                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod edition;
pub mod print_house;
