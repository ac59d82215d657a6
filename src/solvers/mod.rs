pub mod newton_krylov;
