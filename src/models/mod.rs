mod car;
mod person;

pub use car::{Car, CarChangeset, NewCar};
pub use person::{NewPerson, Person};
