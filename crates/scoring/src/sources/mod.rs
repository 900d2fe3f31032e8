pub mod basathle;
